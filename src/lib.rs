//! Controllable time source for deterministic testing of time-dependent code.
//!
//! Application code that measures timeouts, retries, or schedules should not
//! be coupled to the native flow of time. This crate decouples it behind the
//! [`Clock`] capability, which exposes two sources:
//!
//! - *Tick* time: a monotonic nanosecond counter, meaningful only in
//!   differences, used for timers and duration measurement.
//! - *Wall-clock* time: milliseconds since the Unix epoch, subject to
//!   external correction (NTP, manual clock-set).
//!
//! # Clock types
//!
//! - [`SystemClock`]: the real sources — host monotonic counter, `Utc::now()`
//!   and the tokio timer. Use in production.
//! - [`MockClock`]: a controllable clock for tests. Depending on its
//!   [`Mode`] the state is frozen, keeps ticking between mutations, or
//!   delegates to the system clock. Mutations shift tick and wall time
//!   together, correct wall time alone, or rewrite the state outright.
//!
//! # Example
//!
//! ```rust
//! use chronometer::{Clock, MockClock, TimeUnit};
//!
//! let clock = MockClock::frozen_at_moment("2017-03-13 02:12:30.763 UTC", 0)?;
//! let marker_ns = clock.tick_ns();
//!
//! clock.shift_by(1_500, 0)?;
//!
//! assert_eq!(clock.elapsed_ns(marker_ns), 1_500_000_000);
//! assert_eq!(clock.elapsed(marker_ns, TimeUnit::Milliseconds), 1_500);
//! # Ok::<(), chronometer::ClockError>(())
//! ```
//!
//! # Concurrency
//!
//! A [`MockClock`] can be shared across threads. Its state is an immutable
//! snapshot replaced atomically as one unit, so reads never lock and never
//! observe partially-updated state; mutations go through a retrying
//! compare-and-swap loop and are linearizable with respect to each other.
//! Tick arithmetic is wraparound-safe: clocks deliberately seeded near
//! `i64::MAX` report saturated, never negative, elapsed times.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod elapsed;
mod error;
mod mock;
mod sleep;
mod state;
mod system;
mod timestamp;
mod unit;

pub use clock::Clock;
pub use config::ClockConfig;
pub use elapsed::{JITTER_BOUND_NS, elapsed_in, elapsed_ns};
pub use error::ClockError;
pub use mock::{MockClock, Mode};
pub use sleep::{ClockSleep, sleep_uninterruptible};
pub use system::SystemClock;
pub use timestamp::parse_epoch_ms;
pub use unit::TimeUnit;
