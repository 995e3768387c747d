//! Converter configuration.

use serde::{Deserialize, Serialize};
use timespec::ClockKind;

use crate::Result;

/// What to do with finite millisecond values too large for a 64-bit
/// microsecond count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with [`TimevalError::OutOfRange`](crate::TimevalError::OutOfRange).
    #[default]
    Error,
    /// Map to the infinite sentinel with the same sign.
    Saturate,
}

/// Options for a [`Converter`](crate::Converter).
///
/// Missing fields fall back to their defaults, so `{}` is a valid document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Handling of out-of-range finite input.
    pub overflow: OverflowPolicy,

    /// Clock produced by millisecond conversion and used as the
    /// normalization target when converting back.
    pub target_clock: ClockKind,
}

impl ConverterConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimevalError;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.overflow, OverflowPolicy::Error);
        assert_eq!(config.target_clock, ClockKind::Realtime);
    }

    #[test]
    fn test_from_json_empty_object_uses_defaults() {
        let config = ConverterConfig::from_json("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_from_json_overrides() {
        let config =
            ConverterConfig::from_json(r#"{"overflow":"saturate","target_clock":"monotonic"}"#)
                .unwrap();
        assert_eq!(config.overflow, OverflowPolicy::Saturate);
        assert_eq!(config.target_clock, ClockKind::Monotonic);
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = ConverterConfig::from_json(r#"{"overflow":"wrap"}"#).unwrap_err();
        assert!(matches!(err, TimevalError::Config(_)));
        assert!(err.to_string().starts_with("configuration error"));
    }
}
