use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

use crate::ClockKind;

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Largest nanosecond component a [`Timespec`] can carry.
pub const MAX_FINITE_NANOS: i32 = NANOS_PER_SECOND - 1;

const NANOS_PER_SECOND_WIDE: i128 = NANOS_PER_SECOND as i128;
const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;

/// Tagged view of a [`Timespec`] with the sentinels spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeValue {
    /// A finite reading. `nanos` carries the same sign as the total value.
    Finite {
        /// Whole seconds, truncated toward zero.
        secs: i64,
        /// Remaining nanoseconds, `|nanos| < 1_000_000_000`.
        nanos: i32,
    },
    /// Later than every finite reading.
    InfiniteFuture,
    /// Earlier than every finite reading.
    InfinitePast,
}

/// A fixed-point timestamp: seconds, nanoseconds and a clock kind.
///
/// Values are kept normalized with truncation toward zero: the nanosecond
/// part always has the sign of the whole value, so `-1.5s` is stored as
/// `secs = -1, nanos = -500_000_000`.
///
/// A seconds field of `i64::MAX` marks the infinite future and `i64::MIN`
/// the infinite past. Those bit patterns are reserved; every constructor
/// that lands on a bound yields the canonical sentinel with
/// `nanos = ±999_999_999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timespec {
    secs: i64,
    nanos: i32,
    clock: ClockKind,
}

impl Timespec {
    /// Sentinel for the infinite future on `clock`.
    #[inline]
    pub const fn infinite_future(clock: ClockKind) -> Self {
        Self {
            secs: i64::MAX,
            nanos: MAX_FINITE_NANOS,
            clock,
        }
    }

    /// Sentinel for the infinite past on `clock`.
    #[inline]
    pub const fn infinite_past(clock: ClockKind) -> Self {
        Self {
            secs: i64::MIN,
            nanos: -MAX_FINITE_NANOS,
            clock,
        }
    }

    /// Zero on `clock`: the epoch for absolute clocks, an empty span for
    /// [`ClockKind::Timespan`].
    #[inline]
    pub const fn zero(clock: ClockKind) -> Self {
        Self {
            secs: 0,
            nanos: 0,
            clock,
        }
    }

    /// Build a timestamp from raw fields, normalizing them.
    ///
    /// `nanos` may be out of range or of the opposite sign; the excess is
    /// carried into the seconds. A `secs` of `i64::MAX` or `i64::MIN` is read
    /// as the matching sentinel regardless of `nanos`.
    pub fn new(secs: i64, nanos: i32, clock: ClockKind) -> Self {
        match secs {
            i64::MAX => Self::infinite_future(clock),
            i64::MIN => Self::infinite_past(clock),
            _ => Self::from_nanos(
                i128::from(secs) * NANOS_PER_SECOND_WIDE + i128::from(nanos),
                clock,
            ),
        }
    }

    /// Build a timestamp from a signed nanosecond count.
    ///
    /// Counts whose seconds do not fit strictly inside the `i64` range
    /// saturate to the matching sentinel.
    pub fn from_nanos(nanos: i128, clock: ClockKind) -> Self {
        let secs = nanos / NANOS_PER_SECOND_WIDE;
        if secs >= i128::from(i64::MAX) {
            return Self::infinite_future(clock);
        }
        if secs <= i128::from(i64::MIN) {
            return Self::infinite_past(clock);
        }
        Self {
            secs: secs as i64,
            nanos: (nanos % NANOS_PER_SECOND_WIDE) as i32,
            clock,
        }
    }

    /// Build a timestamp from a signed microsecond count.
    #[inline]
    pub fn from_micros(micros: i64, clock: ClockKind) -> Self {
        Self::from_nanos(i128::from(micros) * NANOS_PER_MICRO, clock)
    }

    /// Build a timestamp from a signed millisecond count.
    #[inline]
    pub fn from_millis(millis: i64, clock: ClockKind) -> Self {
        Self::from_nanos(i128::from(millis) * NANOS_PER_MILLI, clock)
    }

    /// Build a [`ClockKind::Timespan`] from a [`Duration`].
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_nanos(duration.as_nanos() as i128, ClockKind::Timespan)
    }

    /// Whole seconds.
    #[inline]
    pub const fn secs(&self) -> i64 {
        self.secs
    }

    /// Sub-second nanoseconds, signed like the whole value.
    #[inline]
    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    /// The clock this reading belongs to.
    #[inline]
    pub const fn clock(&self) -> ClockKind {
        self.clock
    }

    /// Rewrite the clock tag, leaving seconds and nanoseconds untouched.
    #[inline]
    pub const fn with_clock(self, clock: ClockKind) -> Self {
        Self { clock, ..self }
    }

    /// Tagged view of this timestamp.
    pub const fn value(&self) -> TimeValue {
        match self.secs {
            i64::MAX => TimeValue::InfiniteFuture,
            i64::MIN => TimeValue::InfinitePast,
            secs => TimeValue::Finite {
                secs,
                nanos: self.nanos,
            },
        }
    }

    /// Inverse of [`Timespec::value`].
    pub fn from_value(value: TimeValue, clock: ClockKind) -> Self {
        match value {
            TimeValue::Finite { secs, nanos } => Self::new(secs, nanos, clock),
            TimeValue::InfiniteFuture => Self::infinite_future(clock),
            TimeValue::InfinitePast => Self::infinite_past(clock),
        }
    }

    /// Returns `true` for the infinite-future sentinel on any clock.
    #[inline]
    pub const fn is_infinite_future(&self) -> bool {
        self.secs == i64::MAX
    }

    /// Returns `true` for the infinite-past sentinel on any clock.
    #[inline]
    pub const fn is_infinite_past(&self) -> bool {
        self.secs == i64::MIN
    }

    /// Returns `true` unless this is one of the sentinels.
    #[inline]
    pub const fn is_finite(&self) -> bool {
        !self.is_infinite_future() && !self.is_infinite_past()
    }

    /// Total nanoseconds, or `None` for the sentinels.
    pub fn as_nanos(&self) -> Option<i128> {
        match self.value() {
            TimeValue::Finite { secs, nanos } => {
                Some(i128::from(secs) * NANOS_PER_SECOND_WIDE + i128::from(nanos))
            }
            TimeValue::InfiniteFuture | TimeValue::InfinitePast => None,
        }
    }

    /// Compare two readings of the same clock.
    ///
    /// Readings of different clocks are not comparable and yield `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if self.clock != other.clock {
            return None;
        }
        Some(self.ordering_key().cmp(&other.ordering_key()))
    }

    // Sentinels are canonical, so their keys sit above and below every finite key.
    fn ordering_key(&self) -> i128 {
        i128::from(self.secs) * NANOS_PER_SECOND_WIDE + i128::from(self.nanos)
    }
}

impl PartialOrd for Timespec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

/// Offset a timestamp by a span.
///
/// The right-hand side is read as a relative span whatever its tag; the
/// result keeps the clock of the left-hand side. An infinite left-hand side
/// is returned unchanged, an infinite span yields the matching sentinel and
/// overflow saturates.
impl Add for Timespec {
    type Output = Timespec;

    fn add(self, span: Timespec) -> Timespec {
        match (self.value(), span.value()) {
            (TimeValue::InfiniteFuture | TimeValue::InfinitePast, _) => self,
            (_, TimeValue::InfiniteFuture) => Self::infinite_future(self.clock),
            (_, TimeValue::InfinitePast) => Self::infinite_past(self.clock),
            (TimeValue::Finite { .. }, TimeValue::Finite { .. }) => {
                Self::from_nanos(self.ordering_key() + span.ordering_key(), self.clock)
            }
        }
    }
}

/// Difference of two timestamps.
///
/// Subtracting a [`ClockKind::Timespan`] moves the left-hand side and keeps
/// its clock. Subtracting an absolute reading yields a timespan; both sides
/// are expected to be on the same clock. Infinite operands saturate the
/// same way [`Add`] does.
impl Sub for Timespec {
    type Output = Timespec;

    fn sub(self, other: Timespec) -> Timespec {
        let clock = if other.clock.is_timespan() {
            self.clock
        } else {
            ClockKind::Timespan
        };

        match (self.value(), other.value()) {
            (TimeValue::InfiniteFuture, _) => Self::infinite_future(clock),
            (TimeValue::InfinitePast, _) => Self::infinite_past(clock),
            (_, TimeValue::InfinitePast) => Self::infinite_future(clock),
            (_, TimeValue::InfiniteFuture) => Self::infinite_past(clock),
            (TimeValue::Finite { .. }, TimeValue::Finite { .. }) => {
                Self::from_nanos(self.ordering_key() - other.ordering_key(), clock)
            }
        }
    }
}

impl fmt::Display for Timespec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            TimeValue::InfiniteFuture => write!(f, "+inf ({})", self.clock),
            TimeValue::InfinitePast => write!(f, "-inf ({})", self.clock),
            TimeValue::Finite { secs, nanos } => {
                let sign = if secs < 0 || nanos < 0 { "-" } else { "" };
                write!(
                    f,
                    "{}{}.{:09}s ({})",
                    sign,
                    secs.unsigned_abs(),
                    nanos.unsigned_abs(),
                    self.clock
                )
            }
        }
    }
}

impl From<Duration> for Timespec {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}
