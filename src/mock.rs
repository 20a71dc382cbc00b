use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use crate::clock::Clock;
use crate::error::ClockError;
use crate::sleep::{ClockSleep, duration_ns};
use crate::state::{ClockState, MS_PER_SEC, NS_PER_MS};
use crate::system::SystemClock;
use crate::timestamp;
use crate::unit::TimeUnit;

// Mode constants for atomic storage
const MODE_FROZEN: u8 = 0;
const MODE_TICKING: u8 = 1;
const MODE_SYSTEM: u8 = 2;

/// How a [`MockClock`] advances between mutation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// State changes only through explicit mutation calls.
    Frozen,
    /// State keeps advancing between mutation calls, the way a real clock
    /// would, using the real monotonic source as the reference.
    Ticking,
    /// All reads delegate to the system clock; mutations are rejected.
    System,
}

impl Mode {
    fn as_u8(self) -> u8 {
        match self {
            Mode::Frozen => MODE_FROZEN,
            Mode::Ticking => MODE_TICKING,
            Mode::System => MODE_SYSTEM,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            MODE_FROZEN => Mode::Frozen,
            MODE_TICKING => Mode::Ticking,
            MODE_SYSTEM => Mode::System,
            _ => unreachable!(),
        }
    }
}

/// Controllable clock for tests: both the tick and the wall source can be
/// frozen, shifted, and corrected independently of real time.
///
/// Reads never lock. The current state snapshot sits behind an
/// [`ArcSwap`] and is replaced as one unit, so a reader racing a mutation
/// observes either the pre- or post-mutation snapshot, never a torn mix of
/// fields. Mutations are optimistic compare-and-swap transactions that retry
/// until they apply uncontended; each retry is O(1) pure computation, and
/// starvation under heavy mutation contention is an accepted limitation.
pub struct MockClock {
    /// Plain shared flag, written rarely and read often. Last writer wins on
    /// concurrent mode switches; no stronger atomicity with respect to state.
    mode: AtomicU8,
    state: ArcSwap<ClockState>,
}

impl MockClock {
    /// Create a clock in the given mode, seeded from the system clock.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode: AtomicU8::new(mode.as_u8()),
            state: ArcSwap::from_pointee(ClockState::now()),
        }
    }

    /// A frozen clock seeded from the system clock.
    pub fn frozen() -> Self {
        Self::new(Mode::Frozen)
    }

    /// A frozen clock seeded with explicit wall and tick values.
    pub fn frozen_at(epoch_ms: i64, tick_ns: i64) -> Self {
        let clock = Self::new(Mode::Frozen);
        clock.store_state(ClockState::new(epoch_ms, 0, tick_ns));
        clock
    }

    /// A frozen clock seeded from a moment string.
    pub fn frozen_at_moment(moment: &str, tick_ns: i64) -> Result<Self, ClockError> {
        Ok(Self::frozen_at(timestamp::parse_epoch_ms(moment)?, tick_ns))
    }

    /// A ticking clock seeded from the system clock.
    pub fn ticking() -> Self {
        Self::new(Mode::Ticking)
    }

    /// A ticking clock seeded with explicit wall and tick values.
    pub fn ticking_at(epoch_ms: i64, tick_ns: i64) -> Self {
        let clock = Self::new(Mode::Ticking);
        clock.store_state(ClockState::new(epoch_ms, 0, tick_ns));
        clock
    }

    /// A ticking clock seeded from a moment string.
    pub fn ticking_at_moment(moment: &str, tick_ns: i64) -> Result<Self, ClockError> {
        Ok(Self::ticking_at(timestamp::parse_epoch_ms(moment)?, tick_ns))
    }

    /// A clock that behaves exactly like [`SystemClock`].
    pub fn system() -> Self {
        Self::new(Mode::System)
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        Mode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Switch mode and reseed the state from the system clock.
    ///
    /// Deliberately outside the CAS protocol: a read racing the switch may
    /// observe the old mode with the new state (or vice versa) for a bounded
    /// window. Mode switches are administrative, not steady-state traffic.
    pub fn set_mode(&self, mode: Mode) {
        self.mode.store(mode.as_u8(), Ordering::Release);
        tracing::debug!(?mode, "mock clock mode switched");
        self.reset();
    }

    /// Reseed the state from the system clock. No-op in `System` mode, which
    /// always reports current time anyway.
    pub fn reset(&self) -> &Self {
        match self.mode() {
            Mode::Frozen | Mode::Ticking => self.store_state(ClockState::now()),
            Mode::System => {}
        }
        self
    }

    /// Replace the state with explicit wall and tick seeds.
    pub fn reset_to(
        &self,
        epoch_ms: i64,
        adjustment_ns: i64,
        tick_ns: i64,
    ) -> Result<&Self, ClockError> {
        match self.mode() {
            Mode::Frozen | Mode::Ticking => {
                self.store_state(ClockState::new(epoch_ms, adjustment_ns, tick_ns));
                Ok(self)
            }
            mode @ Mode::System => Err(ClockError::ModeUnsupported(mode)),
        }
    }

    /// Replace the state from a moment string and a tick seed.
    pub fn reset_to_moment(&self, moment: &str, tick_ns: i64) -> Result<&Self, ClockError> {
        self.reset_to(timestamp::parse_epoch_ms(moment)?, 0, tick_ns)
    }

    /// Shift both tick and wall time by the given delta.
    pub fn shift_by(&self, delta_ms: i64, delta_ns: i64) -> Result<&Self, ClockError> {
        self.transact(|state| state.shift_both(delta_ms, delta_ns))
    }

    /// Shift both tick and wall time by a delta in the given unit.
    pub fn shift_by_in(&self, delta: i64, unit: TimeUnit) -> Result<&Self, ClockError> {
        if unit < TimeUnit::Milliseconds {
            self.shift_by(0, unit.to_nanos(delta))
        } else {
            self.shift_by(unit.to_millis(delta), 0)
        }
    }

    /// Shift both tick and wall time so the wall clock lands on the given
    /// epoch moment.
    pub fn shift_to(&self, epoch_ms: i64, adjustment_ns: i64) -> Result<&Self, ClockError> {
        self.transact(|state| {
            state.shift_both(
                epoch_ms.wrapping_sub(state.wall_ms),
                adjustment_ns.wrapping_sub(state.wall_ns),
            )
        })
    }

    /// Shift both tick and wall time so the wall clock lands on the given
    /// instant.
    pub fn shift_to_instant(&self, moment: DateTime<Utc>) -> Result<&Self, ClockError> {
        self.shift_to(
            moment.timestamp_millis(),
            moment.timestamp_subsec_nanos() as i64 % NS_PER_MS,
        )
    }

    /// Shift both tick and wall time so the wall clock lands on the given
    /// moment string.
    pub fn shift_to_moment(&self, moment: &str) -> Result<&Self, ClockError> {
        self.shift_to(timestamp::parse_epoch_ms(moment)?, 0)
    }

    /// Shift wall time only, by a delta. The tick source is untouched, which
    /// is what an NTP step or a manual clock-set does to a real machine.
    pub fn correct_time_by(&self, delta_ms: i64, delta_ns: i64) -> Result<&Self, ClockError> {
        self.transact(|state| state.shift_wall_only(delta_ms, delta_ns))
    }

    /// Set wall time absolutely, leaving the tick source untouched.
    pub fn correct_time_to(&self, epoch_ms: i64, adjustment_ns: i64) -> Result<&Self, ClockError> {
        self.transact(|state| state.set_wall(epoch_ms, adjustment_ns))
    }

    fn store_state(&self, state: ClockState) {
        self.state.store(Arc::new(state));
    }

    /// One optimistic state transaction: snapshot, compute a candidate, swap
    /// it in only if the snapshot is still current, retry otherwise.
    ///
    /// In `Ticking` mode the snapshot is actualized first so the mutation
    /// does not discard real time that passed since the last state change.
    fn transact(&self, transform: impl Fn(&ClockState) -> ClockState) -> Result<&Self, ClockError> {
        loop {
            let current = self.state.load();
            let candidate = match self.mode() {
                Mode::Frozen => transform(&current),
                Mode::Ticking => transform(&current.actualize()),
                mode @ Mode::System => return Err(ClockError::ModeUnsupported(mode)),
            };

            let previous = self.state.compare_and_swap(&*current, Arc::new(candidate));
            if Arc::ptr_eq(&previous, &current) {
                return Ok(self);
            }
        }
    }
}

impl Clock for MockClock {
    fn tick_ns(&self) -> i64 {
        let state = self.state.load();
        match self.mode() {
            Mode::Frozen => state.tick_ns,
            Mode::Ticking => state.tick_ns.wrapping_add(state.elapsed_since_capture_ns()),
            Mode::System => SystemClock.tick_ns(),
        }
    }

    fn epoch_ms(&self) -> i64 {
        let state = self.state.load();
        match self.mode() {
            Mode::Frozen => state.wall_ms,
            Mode::Ticking => {
                let total_ns = state.wall_ns.wrapping_add(state.elapsed_since_capture_ns());
                state.wall_ms.wrapping_add(total_ns.div_euclid(NS_PER_MS))
            }
            Mode::System => SystemClock.epoch_ms(),
        }
    }

    fn instant(&self) -> DateTime<Utc> {
        let state = self.state.load();
        match self.mode() {
            Mode::Frozen => wall_to_instant(state.wall_ms, state.wall_ns),
            Mode::Ticking => {
                let total_ns = state.wall_ns.wrapping_add(state.elapsed_since_capture_ns());
                wall_to_instant(
                    state.wall_ms.wrapping_add(total_ns.div_euclid(NS_PER_MS)),
                    total_ns.rem_euclid(NS_PER_MS),
                )
            }
            Mode::System => SystemClock.now(),
        }
    }

    fn sleep(&self, duration: Duration) -> ClockSleep {
        match self.mode() {
            // Waiting on a frozen clock is simulated: advance by the full
            // duration and resolve at once.
            Mode::Frozen => match self.shift_by(0, duration_ns(duration)) {
                Ok(_) => ClockSleep::immediate(),
                // Mode raced to System between the dispatch and the shift.
                Err(_) => ClockSleep::timer(duration),
            },
            Mode::Ticking | Mode::System => ClockSleep::timer(duration),
        }
    }
}

impl Default for MockClock {
    /// A ticking clock seeded from the system clock.
    fn default() -> Self {
        Self::new(Mode::Ticking)
    }
}

impl std::fmt::Debug for MockClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClock")
            .field("mode", &self.mode())
            .field("state", &**self.state.load())
            .finish()
    }
}

fn wall_to_instant(wall_ms: i64, wall_ns: i64) -> DateTime<Utc> {
    let secs = wall_ms.div_euclid(MS_PER_SEC);
    let sub_ns = wall_ms.rem_euclid(MS_PER_SEC) * NS_PER_MS + wall_ns;
    DateTime::from_timestamp(secs, sub_ns as u32).expect("valid timestamp")
}
