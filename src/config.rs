use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClockError;
use crate::mock::{MockClock, Mode};
use crate::system::SystemClock;

/// Declarative configuration for a [`MockClock`], e.g. from a test fixture
/// or a service config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Mode the clock starts in.
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Wall-clock time the clock starts at. Defaults to the current time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    /// Tick counter seed. Defaults to the current system tick reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_ns: Option<i64>,
}

fn default_mode() -> Mode {
    Mode::Ticking
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            start_at: None,
            tick_ns: None,
        }
    }
}

impl ClockConfig {
    /// Build a clock from this configuration.
    ///
    /// Fails if explicit seeds are combined with `System` mode, which does
    /// not own its state.
    pub fn build(&self) -> Result<MockClock, ClockError> {
        let clock = MockClock::new(self.mode);
        if self.start_at.is_some() || self.tick_ns.is_some() {
            let epoch_ms = self
                .start_at
                .map_or_else(|| SystemClock.epoch_ms(), |t| t.timestamp_millis());
            let tick_ns = self.tick_ns.unwrap_or_else(|| SystemClock.tick_ns());
            clock.reset_to(epoch_ms, 0, tick_ns)?;
        }
        tracing::debug!(mode = ?self.mode, "mock clock configured");
        Ok(clock)
    }
}
