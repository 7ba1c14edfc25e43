//! Lesson release repository port.
//!
//! At most one record exists per (lesson, cohort). A missing record is a
//! normal answer meaning the lesson is not gated.

use crate::domain::foundation::{CohortId, DomainError, LessonId, Timestamp};
use crate::domain::schedule::LessonRelease;
use async_trait::async_trait;

#[async_trait]
pub trait LessonReleaseRepository: Send + Sync {
    /// Find the release record for a lesson within a cohort.
    ///
    /// # Errors
    ///
    /// - `MalformedDate` if the stored release date cannot be decoded
    /// - `StoreUnavailable` on connection failure
    async fn find(
        &self,
        lesson_id: &LessonId,
        cohort_id: &CohortId,
    ) -> Result<Option<LessonRelease>, DomainError>;

    /// Insert or replace the record for its (lesson, cohort) pair.
    async fn save(&self, release: &LessonRelease) -> Result<(), DomainError>;

    /// Set the manual override.
    ///
    /// Never clears it. If already released, the stored `released_at` is kept.
    ///
    /// # Errors
    ///
    /// - `LessonReleaseNotFound` if no record exists
    async fn force_release(
        &self,
        lesson_id: &LessonId,
        cohort_id: &CohortId,
        released_at: Timestamp,
    ) -> Result<(), DomainError>;
}
