//! Runtime error types

use thiserror::Error;

/// Voter runtime error
#[derive(Error, Debug)]
pub enum VoterError {
    /// An evaluator reported a failure
    ///
    /// Surfaced verbatim from whichever evaluator failed first; a
    /// `decide` call never aggregates multiple simultaneous failures.
    #[error("Evaluator failed: {0}")]
    Evaluator(String),

    /// A basis position was addressed that does not exist
    #[error("Basis position {position} out of range (basis length {len})")]
    PositionOutOfRange {
        /// Requested position
        position: usize,
        /// Basis length at the time of the call
        len: usize,
    },
}

impl VoterError {
    /// Build an evaluator failure from any displayable reason
    pub fn evaluator(reason: impl Into<String>) -> Self {
        VoterError::Evaluator(reason.into())
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, VoterError>;
