use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

use crate::elapsed::{elapsed_in, elapsed_ns};
use crate::sleep::ClockSleep;
use crate::unit::TimeUnit;

/// Capability surface of a time source.
///
/// Every clock is backed by two sources: *tick* time, a monotonic counter
/// meaningful only in differences and used for duration measurement, and
/// *wall-clock* time since the Unix epoch, which is subject to external
/// correction (NTP, manual clock-set). The two can move independently.
///
/// Production code uses [`SystemClock`](crate::SystemClock); tests use
/// [`MockClock`](crate::MockClock), which implements the same surface but
/// lets the test control how both sources move.
pub trait Clock {
    /// Current tick time in nanoseconds.
    fn tick_ns(&self) -> i64;

    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> i64;

    /// Current wall-clock time as a UTC instant.
    fn instant(&self) -> DateTime<Utc>;

    /// Sleep on this clock's notion of time.
    fn sleep(&self, duration: Duration) -> ClockSleep;

    /// Current wall-clock time in an arbitrary time zone.
    fn datetime_in<Tz: TimeZone>(&self, tz: Tz) -> DateTime<Tz>
    where
        Self: Sized,
    {
        self.instant().with_timezone(&tz)
    }

    /// Elapsed nanoseconds since a tick reading taken from this clock.
    ///
    /// Jitter- and wraparound-safe, see [`elapsed_ns`](crate::elapsed_ns).
    fn elapsed_ns(&self, start_tick_ns: i64) -> i64 {
        elapsed_ns(start_tick_ns, self.tick_ns())
    }

    /// Elapsed time since a tick reading, in the requested unit.
    fn elapsed(&self, start_tick_ns: i64, unit: TimeUnit) -> i64 {
        elapsed_in(start_tick_ns, self.tick_ns(), unit)
    }

    /// Run a closure and measure its duration in nanoseconds.
    fn measure_ns(&self, f: impl FnOnce()) -> i64
    where
        Self: Sized,
    {
        let marker_ns = self.tick_ns();
        f();
        self.elapsed_ns(marker_ns)
    }

    /// Run a closure and measure its duration in the requested unit.
    fn measure(&self, unit: TimeUnit, f: impl FnOnce()) -> i64
    where
        Self: Sized,
    {
        let marker_ns = self.tick_ns();
        f();
        self.elapsed(marker_ns, unit)
    }
}
