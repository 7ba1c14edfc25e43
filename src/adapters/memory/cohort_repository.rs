//! In-memory implementation of CohortRepository.
//!
//! For tests and local runs. Counts status writes so reconciliation
//! idempotence can be asserted, and can simulate an unreachable store or
//! corrupt rows.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::cohort::{Cohort, CohortStatus};
use crate::domain::foundation::{CohortId, CourseId, DomainError, ErrorCode, Timestamp};
use crate::ports::CohortRepository;

#[derive(Debug, Default)]
pub struct InMemoryCohortRepository {
    cohorts: RwLock<HashMap<CohortId, Cohort>>,
    corrupt: RwLock<HashSet<CohortId>>,
    status_writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryCohortRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cohort as course administration would.
    pub async fn insert(&self, cohort: Cohort) {
        self.cohorts.write().await.insert(cohort.id, cohort);
    }

    /// Reads back a stored cohort without going through the port.
    pub async fn get(&self, id: &CohortId) -> Option<Cohort> {
        self.cohorts.read().await.get(id).cloned()
    }

    // === Test Helpers ===

    /// Number of `update_status` calls that reached storage.
    pub fn status_write_count(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }

    /// Makes every call fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes reads of `id` fail as an undecodable row.
    pub async fn mark_corrupt(&self, id: CohortId) {
        self.corrupt.write().await.insert(id);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("cohort store is unavailable"));
        }
        Ok(())
    }

    async fn check_decodable(&self, id: &CohortId) -> Result<(), DomainError> {
        if self.corrupt.read().await.contains(id) {
            return Err(DomainError::malformed_date("start_date", "stored date is not decodable")
                .with_detail("cohort_id", id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CohortRepository for InMemoryCohortRepository {
    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError> {
        self.check_available()?;
        self.check_decodable(id).await?;
        Ok(self.cohorts.read().await.get(id).cloned())
    }

    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Cohort>, DomainError> {
        self.check_available()?;
        let corrupt = self.corrupt.read().await;
        let cohorts = self.cohorts.read().await;

        let mut found = Vec::new();
        for cohort in cohorts.values().filter(|c| &c.course_id == course_id) {
            if corrupt.contains(&cohort.id) {
                return Err(DomainError::malformed_date("start_date", "stored date is not decodable")
                    .with_detail("cohort_id", cohort.id.to_string()));
            }
            found.push(cohort.clone());
        }
        found.sort_by_key(|c| c.start_date);
        Ok(found)
    }

    async fn update_status(
        &self,
        id: &CohortId,
        status: CohortStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let mut cohorts = self.cohorts.write().await;
        let cohort = cohorts.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::CohortNotFound, format!("Cohort not found: {}", id))
        })?;

        cohort.status = status;
        cohort.updated_at = updated_at;
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
