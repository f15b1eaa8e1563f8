//! Error types for board construction, parsing and persistence.

use thiserror::Error;

/// Errors produced by the simulation core and the run-record file.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Board side length outside `1..=MAX_SIZE`.
    #[error(
        "invalid board size {0}: side length must be between 1 and {max}",
        max = crate::board::MAX_SIZE
    )]
    InvalidSize(i64),

    /// Malformed serialized board or run record.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// `step()` called on a run that already reached an end condition.
    #[error("run already finished")]
    RunFinished,

    /// A record was requested for a run that has not ended.
    #[error("run has not finished")]
    RunInProgress,

    /// Reading or writing the run-record file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LifeError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LifeError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
