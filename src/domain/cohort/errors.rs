//! Cohort handler error types.

use thiserror::Error;

use crate::domain::foundation::{CohortId, DomainError, ValidationError};
use crate::domain::schedule::ReleaseError;

#[derive(Debug, Clone, Error)]
pub enum CohortError {
    #[error("Cohort not found: {0}")]
    NotFound(CohortId),

    #[error("Invalid cohort status change: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error("Next release time unavailable: {0}")]
    ReleaseTime(#[from] ReleaseError),

    #[error("Cohort store failed: {0}")]
    Store(#[from] DomainError),
}

impl CohortError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, CohortError::Store(err) if err.is_retryable())
    }
}
