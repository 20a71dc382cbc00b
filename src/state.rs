use crate::elapsed::elapsed_ns;
use crate::system::SystemClock;

pub(crate) const NS_PER_MS: i64 = 1_000_000;
pub(crate) const MS_PER_SEC: i64 = 1_000;

/// An immutable capture of wall-clock and tick state at one instant.
///
/// Snapshots are never mutated in place: every transform produces a fresh
/// value and the owning clock swaps whole snapshots atomically, so readers
/// can never observe a torn mix of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClockState {
    /// Wall-clock milliseconds since the Unix epoch.
    pub wall_ms: i64,
    /// Sub-millisecond nanosecond remainder, `0..NS_PER_MS`.
    pub wall_ns: i64,
    /// Monotonic counter value of this snapshot. Opaque two's-complement;
    /// deliberately allowed to wrap under extreme shifts.
    pub tick_ns: i64,
    /// Real monotonic reading taken when this snapshot was built. Only used
    /// by `Ticking` mode to fold in real elapsed time; never exposed.
    captured_at_tick_ns: i64,
}

impl ClockState {
    /// Build a snapshot, folding `wall_ns` into whole milliseconds with floor
    /// semantics so a negative remainder rolls downward into the coarser
    /// unit (`-123ns` becomes `-1ms` plus a positive remainder), never
    /// truncating toward zero.
    pub fn new(wall_ms: i64, wall_ns: i64, tick_ns: i64) -> Self {
        Self {
            wall_ms: wall_ms.wrapping_add(wall_ns.div_euclid(NS_PER_MS)),
            wall_ns: wall_ns.rem_euclid(NS_PER_MS),
            tick_ns,
            captured_at_tick_ns: SystemClock.tick_ns(),
        }
    }

    /// Snapshot of the system clock, with a zero remainder.
    pub fn now() -> Self {
        Self::new(SystemClock.epoch_ms(), 0, SystemClock.tick_ns())
    }

    /// Advance wall and tick time together by the same real-time delta.
    pub fn shift_both(&self, delta_ms: i64, delta_ns: i64) -> Self {
        Self::new(
            self.wall_ms.wrapping_add(delta_ms),
            self.wall_ns.wrapping_add(delta_ns),
            self.tick_ns
                .wrapping_add(delta_ms.wrapping_mul(NS_PER_MS))
                .wrapping_add(delta_ns),
        )
    }

    /// Advance wall time only, leaving the monotonic counter untouched.
    /// Models an external correction such as an NTP step.
    pub fn shift_wall_only(&self, delta_ms: i64, delta_ns: i64) -> Self {
        Self::new(
            self.wall_ms.wrapping_add(delta_ms),
            self.wall_ns.wrapping_add(delta_ns),
            self.tick_ns,
        )
    }

    /// Absolute wall-time rewrite, tick unchanged.
    pub fn set_wall(&self, wall_ms: i64, wall_ns: i64) -> Self {
        Self::new(wall_ms, wall_ns, self.tick_ns)
    }

    /// Fold the real time elapsed since this snapshot was captured into both
    /// wall and tick components, so a mutation never discards the time that
    /// passed since the previous snapshot.
    pub fn actualize(&self) -> Self {
        self.shift_both(0, self.elapsed_since_capture_ns())
    }

    /// Real elapsed nanoseconds since this snapshot was constructed.
    pub fn elapsed_since_capture_ns(&self) -> i64 {
        elapsed_ns(self.captured_at_tick_ns, SystemClock.tick_ns())
    }
}
