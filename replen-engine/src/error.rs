//! Engine error types.
//!
//! Only two failure modes surface to callers: rejected input and an
//! unavailable upstream fetcher. Per-item anomalies (missing cost,
//! empty history) are absorbed into the output records and are never
//! errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid input for {op}: {reason}")]
    InvalidInput { op: String, reason: String },

    #[error("Upstream inventory fetch failed in {op}: {message}")]
    Upstream { op: String, message: String },
}

impl PlanError {
    pub fn invalid_input(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            op: op.into(),
            reason: reason.into(),
        }
    }

    pub fn upstream(op: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            op: op.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
