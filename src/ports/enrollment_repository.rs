//! Enrollment reader port.
//!
//! Supplies the student's profile timezone for per-student release checks.

use crate::domain::cohort::Enrollment;
use crate::domain::foundation::{CohortId, DomainError, StudentId};
use async_trait::async_trait;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find a student's enrollment in a cohort.
    ///
    /// Returns `None` if the student is not enrolled.
    async fn find(
        &self,
        student_id: &StudentId,
        cohort_id: &CohortId,
    ) -> Result<Option<Enrollment>, DomainError>;
}
