use chrono::{DateTime, Utc};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::sleep::ClockSleep;

/// Anchor for the process-wide monotonic tick counter.
static TICK_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Real time source: the host monotonic counter for tick time, `Utc::now()`
/// for wall-clock time, and the tokio timer for sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Monotonic nanoseconds since a process-wide anchor. Opaque; meaningful
    /// only in differences.
    pub fn tick_ns(&self) -> i64 {
        let anchor = TICK_ANCHOR.get_or_init(Instant::now);
        anchor.elapsed().as_nanos() as i64
    }

    /// Wall-clock milliseconds since the Unix epoch.
    pub fn epoch_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Wall-clock time as a UTC instant.
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl Clock for SystemClock {
    fn tick_ns(&self) -> i64 {
        SystemClock::tick_ns(self)
    }

    fn epoch_ms(&self) -> i64 {
        SystemClock::epoch_ms(self)
    }

    fn instant(&self) -> DateTime<Utc> {
        SystemClock::now(self)
    }

    fn sleep(&self, duration: Duration) -> ClockSleep {
        ClockSleep::timer(duration)
    }
}
