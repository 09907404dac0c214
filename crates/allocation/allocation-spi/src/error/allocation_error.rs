//! Allocation error types

use thiserror::Error;

/// Errors raised by the forecast-allocate pipeline.
///
/// Every failure is reported for the whole batch; there are no partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// Malformed, empty or out-of-range input
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Input violates a constraint of the allocation problem
    #[error("Infeasible input: {reason}")]
    InfeasibleInput { reason: String },
}

impl AllocationError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn infeasible(reason: impl Into<String>) -> Self {
        Self::InfeasibleInput {
            reason: reason.into(),
        }
    }

    /// Stable snake_case tag for drivers that report the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::InfeasibleInput { .. } => "infeasible_input",
        }
    }
}
