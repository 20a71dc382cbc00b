//! Types for working with errors produced by chronometer.

use thiserror::Error;

use crate::mock::Mode;

/// Errors reported by clock construction and mutation calls.
///
/// Arithmetic overflow is deliberately absent: elapsed-time computations
/// saturate rather than fail.
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("ClockError - ModeUnsupported: operation not available in {0:?} mode")]
    ModeUnsupported(Mode),
    #[error("ClockError - Timestamp: could not parse '{moment}': {reason}")]
    Timestamp { moment: String, reason: String },
}

impl ClockError {
    pub(crate) fn timestamp(moment: &str, reason: impl ToString) -> Self {
        Self::Timestamp {
            moment: moment.to_string(),
            reason: reason.to_string(),
        }
    }
}
