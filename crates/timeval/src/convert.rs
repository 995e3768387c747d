//! Moving timestamps between clock kinds.

use timespec::{Clock, ClockKind, Timespec};
use tracing::trace;

/// Express `timespec` on the `target` clock.
///
/// - Same clock: returned unchanged.
/// - Infinite sentinels: only the clock tag is rewritten.
/// - To [`ClockKind::Timespan`]: the distance from now on the source clock.
/// - From [`ClockKind::Timespan`]: now on the target clock plus the span.
/// - Between absolute clocks: the distance from now on the source clock,
///   applied to now on the target clock.
///
/// `clock` supplies the "now" readings.
pub fn convert_clock_kind<C: Clock + ?Sized>(
    timespec: Timespec,
    target: ClockKind,
    clock: &C,
) -> Timespec {
    let source = timespec.clock();
    if source == target {
        return timespec;
    }

    if !timespec.is_finite() {
        trace!(%source, %target, "retagging infinite timestamp");
        return timespec.with_clock(target);
    }

    trace!(%source, %target, %timespec, "converting timestamp between clocks");

    if target.is_timespan() {
        return timespec - clock.now(source);
    }

    if source.is_timespan() {
        return clock.now(target) + timespec;
    }

    clock.now(target) + (timespec - clock.now(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use timespec::FixedClock;

    const RT: ClockKind = ClockKind::Realtime;
    const MONO: ClockKind = ClockKind::Monotonic;
    const SPAN: ClockKind = ClockKind::Timespan;

    fn clock() -> FixedClock {
        // realtime 1_000_000 ms, monotonic 5_000 ms
        FixedClock::from_millis(1_000_000, 5_000)
    }

    #[test]
    fn test_same_clock_is_identity() {
        let ts = Timespec::from_millis(-1_234, MONO);
        assert_eq!(convert_clock_kind(ts, MONO, &clock()), ts);
    }

    #[test]
    fn test_sentinels_only_retag() {
        for kind in [MONO, SPAN] {
            let future = convert_clock_kind(Timespec::infinite_future(kind), RT, &clock());
            assert_eq!(future, Timespec::infinite_future(RT));

            let past = convert_clock_kind(Timespec::infinite_past(RT), kind, &clock());
            assert_eq!(past, Timespec::infinite_past(kind));
        }
    }

    #[test]
    fn test_absolute_to_timespan() {
        let ts = Timespec::from_millis(1_002_500, RT);
        let span = convert_clock_kind(ts, SPAN, &clock());
        assert_eq!(span, Timespec::from_millis(2_500, SPAN));
    }

    #[test]
    fn test_timespan_to_absolute() {
        let span = Timespec::from_millis(-750, SPAN);
        let ts = convert_clock_kind(span, RT, &clock());
        assert_eq!(ts, Timespec::from_millis(999_250, RT));
    }

    #[test]
    fn test_monotonic_to_realtime() {
        // 1.5s after "now" on the monotonic clock
        let ts = Timespec::from_millis(6_500, MONO);
        let converted = convert_clock_kind(ts, RT, &clock());
        assert_eq!(converted, Timespec::from_millis(1_001_500, RT));
    }

    #[test]
    fn test_realtime_to_monotonic() {
        let ts = Timespec::from_millis(999_000, RT);
        let converted = convert_clock_kind(ts, MONO, &clock());
        assert_eq!(converted, Timespec::from_millis(4_000, MONO));
    }
}
