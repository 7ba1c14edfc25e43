//! Cohort repository port.
//!
//! Cohorts are created and edited by course administration. This side only
//! reads them and writes back reconciled status.
//!
//! # Example
//!
//! ```ignore
//! async fn reconcile(
//!     repo: &dyn CohortRepository,
//!     lifecycle: &CohortLifecycleManager,
//!     id: &CohortId,
//! ) -> Result<(), DomainError> {
//!     let Some(mut cohort) = repo.find_by_id(id).await? else {
//!         return Ok(());
//!     };
//!     if lifecycle.reconcile(&mut cohort)?.requires_write() {
//!         repo.update_status(id, cohort.status, cohort.updated_at).await?;
//!     }
//!     Ok(())
//! }
//! ```

use crate::domain::cohort::{Cohort, CohortStatus};
use crate::domain::foundation::{CohortId, CourseId, DomainError, Timestamp};
use async_trait::async_trait;

/// Repository port for cohort reads and status writes.
#[async_trait]
pub trait CohortRepository: Send + Sync {
    /// Find a cohort by ID.
    ///
    /// Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// - `MalformedDate` if the stored dates cannot be decoded
    /// - `StoreUnavailable` on connection failure
    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError>;

    /// List every cohort of a course, ordered by start date.
    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Cohort>, DomainError>;

    /// Targeted write of `status` and `updated_at`; other columns untouched.
    ///
    /// # Errors
    ///
    /// - `CohortNotFound` if the row does not exist
    /// - `StoreUnavailable` on connection failure
    async fn update_status(
        &self,
        id: &CohortId,
        status: CohortStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError>;
}
