//! Release schedule error types.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Failures while computing a release instant.
///
/// Never surfaced to students; the evaluator maps these through its
/// `FailurePolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    #[error("Malformed release date: {reason}")]
    MalformedDate { reason: String },

    #[error("Local time {local} cannot be placed in {zone}")]
    UnresolvableLocalTime { local: NaiveDateTime, zone: String },
}

impl ReleaseError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ReleaseError::MalformedDate {
            reason: reason.into(),
        }
    }
}

/// Errors returned by the release query handlers.
///
/// Only infrastructure failures reach callers; every computation problem is
/// absorbed by the failure policy.
#[derive(Debug, Clone, Error)]
pub enum ReleaseQueryError {
    #[error("Release schedule store failed: {0}")]
    Store(DomainError),

    #[error("No release record for lesson {lesson_id} in cohort {cohort_id}")]
    ReleaseNotFound { lesson_id: String, cohort_id: String },
}

impl ReleaseQueryError {
    /// True when the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReleaseQueryError::Store(err) => err.is_retryable(),
            ReleaseQueryError::ReleaseNotFound { .. } => false,
        }
    }
}

impl From<DomainError> for ReleaseQueryError {
    fn from(err: DomainError) -> Self {
        ReleaseQueryError::Store(err)
    }
}
