//! Clock kinds and clock sources.

use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::Timespec;

/// The clock a [`Timespec`] reading belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// Monotonic clock, unaffected by wall-clock adjustments.
    Monotonic,
    /// Wall clock, counted from the Unix epoch.
    #[default]
    Realtime,
    /// A relative span of time rather than an absolute point.
    Timespan,
}

impl ClockKind {
    /// Returns `true` for relative spans.
    #[inline]
    pub const fn is_timespan(self) -> bool {
        matches!(self, Self::Timespan)
    }

    /// Short lowercase name of the clock kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::Realtime => "realtime",
            Self::Timespan => "timespan",
        }
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of "current time" readings.
///
/// Conversions between clock kinds need to know what time it is on both
/// clocks. Passing the source in explicitly lets tests pin the readings.
pub trait Clock: Send + Sync {
    /// Current time on the given clock, tagged with `kind`.
    ///
    /// A [`ClockKind::Timespan`] reading is always zero.
    fn now(&self, kind: ClockKind) -> Timespec;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self, kind: ClockKind) -> Timespec {
        (**self).now(kind)
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self, kind: ClockKind) -> Timespec {
        (**self).now(kind)
    }
}

/// Reads the operating system clocks.
///
/// Realtime readings come from the wall clock. Monotonic readings count from
/// the first monotonic read made by the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl SystemClock {
    fn realtime() -> Timespec {
        let now = chrono::Utc::now();
        Timespec::new(
            now.timestamp(),
            now.timestamp_subsec_nanos() as i32,
            ClockKind::Realtime,
        )
    }

    fn monotonic() -> Timespec {
        static ANCHOR: OnceLock<Instant> = OnceLock::new();
        let elapsed = ANCHOR.get_or_init(Instant::now).elapsed();
        Timespec::from_duration(elapsed).with_clock(ClockKind::Monotonic)
    }
}

impl Clock for SystemClock {
    fn now(&self, kind: ClockKind) -> Timespec {
        match kind {
            ClockKind::Realtime => Self::realtime(),
            ClockKind::Monotonic => Self::monotonic(),
            ClockKind::Timespan => Timespec::zero(ClockKind::Timespan),
        }
    }
}

/// A clock frozen at fixed readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    realtime: Timespec,
    monotonic: Timespec,
}

impl FixedClock {
    /// Create a clock that always reports the given readings.
    ///
    /// The readings are re-tagged with their clock kind, so any [`Timespec`]
    /// may be passed in.
    pub fn new(realtime: Timespec, monotonic: Timespec) -> Self {
        Self {
            realtime: realtime.with_clock(ClockKind::Realtime),
            monotonic: monotonic.with_clock(ClockKind::Monotonic),
        }
    }

    /// Create a clock from millisecond readings.
    pub fn from_millis(realtime_ms: i64, monotonic_ms: i64) -> Self {
        Self {
            realtime: Timespec::from_millis(realtime_ms, ClockKind::Realtime),
            monotonic: Timespec::from_millis(monotonic_ms, ClockKind::Monotonic),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self, kind: ClockKind) -> Timespec {
        match kind {
            ClockKind::Realtime => self.realtime,
            ClockKind::Monotonic => self.monotonic,
            ClockKind::Timespan => Timespec::zero(ClockKind::Timespan),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_kind_default_is_realtime() {
        assert_eq!(ClockKind::default(), ClockKind::Realtime);
    }

    #[test]
    fn test_clock_kind_display() {
        assert_eq!(ClockKind::Monotonic.to_string(), "monotonic");
        assert_eq!(ClockKind::Realtime.to_string(), "realtime");
        assert_eq!(ClockKind::Timespan.to_string(), "timespan");
    }

    #[test]
    fn test_clock_kind_serde_names() {
        let json = serde_json::to_string(&ClockKind::Timespan).unwrap();
        assert_eq!(json, "\"timespan\"");

        let kind: ClockKind = serde_json::from_str("\"monotonic\"").unwrap();
        assert_eq!(kind, ClockKind::Monotonic);
    }

    #[test]
    fn test_system_clock_tags_readings() {
        let clock = SystemClock;
        assert_eq!(clock.now(ClockKind::Realtime).clock(), ClockKind::Realtime);
        assert_eq!(clock.now(ClockKind::Monotonic).clock(), ClockKind::Monotonic);
        assert_eq!(
            clock.now(ClockKind::Timespan),
            Timespec::zero(ClockKind::Timespan)
        );
    }

    #[test]
    fn test_system_clock_realtime_after_2020() {
        // 2020-01-01T00:00:00Z
        let now = SystemClock.now(ClockKind::Realtime);
        assert!(now.secs() > 1_577_836_800);
        assert!((0..crate::NANOS_PER_SECOND).contains(&now.nanos()));
    }

    #[test]
    fn test_system_clock_monotonic_never_goes_backwards() {
        let a = SystemClock.now(ClockKind::Monotonic);
        let b = SystemClock.now(ClockKind::Monotonic);
        assert!(b >= a);
    }

    #[test]
    fn test_fixed_clock_retags() {
        let clock = FixedClock::new(
            Timespec::from_millis(5, ClockKind::Timespan),
            Timespec::from_millis(7, ClockKind::Realtime),
        );
        assert_eq!(
            clock.now(ClockKind::Realtime),
            Timespec::from_millis(5, ClockKind::Realtime)
        );
        assert_eq!(
            clock.now(ClockKind::Monotonic),
            Timespec::from_millis(7, ClockKind::Monotonic)
        );
    }

    #[test]
    fn test_clock_through_reference_and_box() {
        let clock = FixedClock::from_millis(1_000, 2_000);
        let by_ref: &dyn Clock = &clock;
        let boxed: Box<dyn Clock> = Box::new(clock);
        assert_eq!(by_ref.now(ClockKind::Monotonic).secs(), 2);
        assert_eq!(boxed.now(ClockKind::Realtime).secs(), 1);
    }
}
