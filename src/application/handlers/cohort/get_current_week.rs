//! GetCurrentWeekHandler - Query handler for a cohort's zero-based week index.

use std::sync::Arc;

use crate::domain::cohort::{CohortError, CohortLifecycleManager};
use crate::domain::foundation::{CohortId, Timestamp};
use crate::ports::CohortRepository;

#[derive(Debug, Clone)]
pub struct GetCurrentWeekQuery {
    pub cohort_id: CohortId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCurrentWeekResult {
    pub cohort_id: CohortId,
    pub current_week: u32,
    pub as_of: Timestamp,
}

pub struct GetCurrentWeekHandler {
    repository: Arc<dyn CohortRepository>,
    lifecycle: Arc<CohortLifecycleManager>,
}

impl GetCurrentWeekHandler {
    pub fn new(repository: Arc<dyn CohortRepository>, lifecycle: Arc<CohortLifecycleManager>) -> Self {
        Self {
            repository,
            lifecycle,
        }
    }

    pub async fn handle(&self, query: GetCurrentWeekQuery) -> Result<GetCurrentWeekResult, CohortError> {
        let cohort = self
            .repository
            .find_by_id(&query.cohort_id)
            .await?
            .ok_or(CohortError::NotFound(query.cohort_id))?;

        let as_of = self.lifecycle.now();
        Ok(GetCurrentWeekResult {
            cohort_id: cohort.id,
            current_week: self.lifecycle.current_week(&cohort, as_of),
            as_of,
        })
    }
}
