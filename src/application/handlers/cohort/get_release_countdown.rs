//! GetReleaseCountdownHandler - Query handler for time left until the next weekly release.
//!
//! The countdown is computed in the student's timezone; without one, UTC.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::cohort::{CohortError, CohortLifecycleManager, Countdown};
use crate::domain::foundation::{CohortId, Timestamp};
use crate::domain::schedule::FALLBACK_TIMEZONE;
use crate::ports::CohortRepository;

#[derive(Debug, Clone)]
pub struct GetReleaseCountdownQuery {
    pub cohort_id: CohortId,
    pub student_timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetReleaseCountdownResult {
    pub cohort_id: CohortId,
    pub current_week: u32,
    pub next_release_at: Timestamp,
    pub countdown: Countdown,
}

pub struct GetReleaseCountdownHandler {
    repository: Arc<dyn CohortRepository>,
    lifecycle: Arc<CohortLifecycleManager>,
}

impl GetReleaseCountdownHandler {
    pub fn new(repository: Arc<dyn CohortRepository>, lifecycle: Arc<CohortLifecycleManager>) -> Self {
        Self {
            repository,
            lifecycle,
        }
    }

    pub async fn handle(
        &self,
        query: GetReleaseCountdownQuery,
    ) -> Result<GetReleaseCountdownResult, CohortError> {
        let cohort = self
            .repository
            .find_by_id(&query.cohort_id)
            .await?
            .ok_or(CohortError::NotFound(query.cohort_id))?;

        let tz = query.student_timezone.as_deref().unwrap_or(FALLBACK_TIMEZONE);
        let now = self.lifecycle.now();
        let current_week = self.lifecycle.current_week(&cohort, now);
        let next_release_at = self.lifecycle.next_release_at(&cohort, current_week, tz)?;

        Ok(GetReleaseCountdownResult {
            cohort_id: cohort.id,
            current_week,
            next_release_at,
            countdown: Countdown::from_remaining(next_release_at.duration_since(&now)),
        })
    }
}
