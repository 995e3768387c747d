use timespec::{Clock, ClockKind, SystemClock, TimeValue, Timespec};
use tracing::{debug, trace};

use crate::convert::convert_clock_kind;
use crate::{ConverterConfig, OverflowPolicy, Result, TimevalError};

/// 2^63, the first magnitude that no longer fits in an `i64`.
const MICROS_LIMIT: f64 = 9_223_372_036_854_775_808.0;

const MICROS_PER_MILLI: f64 = 1_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;
const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Converts between millisecond doubles and [`Timespec`] values.
#[derive(Debug, Clone, Default)]
pub struct Converter<C = SystemClock> {
    config: ConverterConfig,
    clock: C,
}

impl Converter {
    /// Create a converter that reads the system clocks.
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }

    /// Start building a converter.
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }
}

impl<C: Clock> Converter<C> {
    /// Create a converter with an explicit clock source.
    pub fn with_clock(config: ConverterConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// The active configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The clock source used for clock-kind conversion.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Convert milliseconds since the epoch to a [`Timespec`] on the
    /// configured target clock.
    ///
    /// `+inf` and `-inf` map to the infinite sentinels. Finite values are
    /// truncated toward zero to whole microseconds, so `1.9999` becomes
    /// 1999 µs.
    ///
    /// # Errors
    ///
    /// - [`TimevalError::InvalidArgument`] for NaN.
    /// - [`TimevalError::OutOfRange`] when the microsecond count does not fit
    ///   in an `i64` and the overflow policy is [`OverflowPolicy::Error`].
    pub fn millis_to_timespec(&self, millis: f64) -> Result<Timespec> {
        let target = self.config.target_clock;

        if millis.is_nan() {
            debug!("rejecting NaN millisecond value");
            return Err(TimevalError::invalid_argument("millisecond value is NaN"));
        }

        if millis == f64::INFINITY {
            return Ok(Timespec::infinite_future(target));
        }
        if millis == f64::NEG_INFINITY {
            return Ok(Timespec::infinite_past(target));
        }

        match millis_to_micros(millis) {
            Some(micros) => Ok(Timespec::from_micros(micros, target)),
            None => match self.config.overflow {
                OverflowPolicy::Error => {
                    debug!(millis, "millisecond value out of range");
                    Err(TimevalError::OutOfRange { millis })
                }
                OverflowPolicy::Saturate => {
                    debug!(millis, "saturating out-of-range millisecond value");
                    Ok(if millis > 0.0 {
                        Timespec::infinite_future(target)
                    } else {
                        Timespec::infinite_past(target)
                    })
                }
            },
        }
    }

    /// Convert a [`Timespec`] to milliseconds since the epoch.
    ///
    /// The timestamp is first moved onto the configured target clock. The
    /// infinite sentinels become `+inf` and `-inf`; anything else is
    /// `secs * 1000 + nanos / 1e6` with no further rounding.
    pub fn timespec_to_millis(&self, timespec: Timespec) -> f64 {
        let timespec = convert_clock_kind(timespec, self.config.target_clock, &self.clock);

        match timespec.value() {
            TimeValue::InfiniteFuture => {
                trace!("infinite future timestamp");
                f64::INFINITY
            }
            TimeValue::InfinitePast => {
                trace!("infinite past timestamp");
                f64::NEG_INFINITY
            }
            TimeValue::Finite { secs, nanos } => {
                secs as f64 * MILLIS_PER_SECOND + f64::from(nanos) / NANOS_PER_MILLI
            }
        }
    }
}

/// Truncate to whole microseconds, or `None` if the result does not fit.
fn millis_to_micros(millis: f64) -> Option<i64> {
    let micros = (millis * MICROS_PER_MILLI).trunc();
    if (-MICROS_LIMIT..MICROS_LIMIT).contains(&micros) {
        Some(micros as i64)
    } else {
        None
    }
}

/// Builder for [`Converter`].
#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder<C = SystemClock> {
    config: ConverterConfig,
    clock: C,
}

impl ConverterBuilder {
    /// Create a builder with the default configuration and the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> ConverterBuilder<C> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the overflow policy.
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow = policy;
        self
    }

    /// Set the target clock.
    pub fn target_clock(mut self, clock: ClockKind) -> Self {
        self.config.target_clock = clock;
        self
    }

    /// Use a different clock source.
    pub fn clock<D: Clock>(self, clock: D) -> ConverterBuilder<D> {
        ConverterBuilder {
            config: self.config,
            clock,
        }
    }

    /// Build the converter.
    pub fn build(self) -> Converter<C> {
        Converter::with_clock(self.config, self.clock)
    }
}
