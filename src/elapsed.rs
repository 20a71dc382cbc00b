//! Elapsed-time arithmetic over raw monotonic readings.
//!
//! Tick values are opaque two's-complement counters. They may sit anywhere in
//! the i64 range (tests deliberately seed clocks near `i64::MAX`), so the
//! subtraction here must wrap rather than panic, and a wrapped result must be
//! recovered or saturated, never returned as a bogus small duration.

use crate::unit::TimeUnit;

/// Monotonic counters can read slightly backwards across CPU cores.
/// Differences within this bound (1ms) are treated as the same instant.
pub const JITTER_BOUND_NS: i64 = 1_000_000;

const NS_PER_US: i64 = 1_000;

/// Elapsed nanoseconds between two monotonic readings.
///
/// A small negative difference is cross-core jitter and reads as zero. A
/// difference below the jitter bound means the raw subtraction wrapped the
/// i64 range; the true elapsed value cannot be represented in nanoseconds,
/// so the result saturates to `i64::MAX`.
pub fn elapsed_ns(start_tick_ns: i64, end_tick_ns: i64) -> i64 {
    let diff = end_tick_ns.wrapping_sub(start_tick_ns);

    if diff >= 0 {
        diff
    } else if diff >= -JITTER_BOUND_NS {
        0
    } else {
        i64::MAX
    }
}

/// Elapsed time between two monotonic readings, in the requested unit.
///
/// For a wrapped subtraction and a unit coarser than nanoseconds, the value
/// is recomputed losslessly in the microsecond domain: both endpoints split
/// into whole microseconds plus a nanosecond remainder, which buys ~10 bits
/// of headroom above the i64 nanosecond range.
pub fn elapsed_in(start_tick_ns: i64, end_tick_ns: i64, unit: TimeUnit) -> i64 {
    let diff = end_tick_ns.wrapping_sub(start_tick_ns);

    if diff >= 0 {
        unit.from_nanos(diff)
    } else if diff >= -JITTER_BOUND_NS {
        0
    } else if unit > TimeUnit::Nanoseconds {
        let mut elapsed_us = diff / NS_PER_US;
        elapsed_us -= i64::MIN / NS_PER_US;
        elapsed_us += i64::MAX / NS_PER_US;
        unit.from_micros(elapsed_us)
    } else {
        i64::MAX
    }
}
