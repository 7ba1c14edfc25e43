//! In-memory implementation of EnrollmentRepository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::cohort::Enrollment;
use crate::domain::foundation::{CohortId, DomainError, StudentId};
use crate::ports::EnrollmentRepository;

#[derive(Debug, Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: RwLock<HashMap<(StudentId, CohortId), Enrollment>>,
    unavailable: AtomicBool,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, enrollment: Enrollment) {
        let key = (enrollment.student_id.clone(), enrollment.cohort_id);
        self.enrollments.write().await.insert(key, enrollment);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn find(
        &self,
        student_id: &StudentId,
        cohort_id: &CohortId,
    ) -> Result<Option<Enrollment>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("enrollment store is unavailable"));
        }
        Ok(self
            .enrollments
            .read()
            .await
            .get(&(student_id.clone(), *cohort_id))
            .cloned())
    }
}
