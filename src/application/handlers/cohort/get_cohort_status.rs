//! GetCohortStatusHandler - Query handler returning a reconciled cohort status.

use std::sync::Arc;

use super::reconcile_cohort::reconcile_and_persist;
use crate::domain::cohort::{CohortError, CohortLifecycleManager, CohortStatus};
use crate::domain::foundation::CohortId;
use crate::ports::CohortRepository;

#[derive(Debug, Clone)]
pub struct GetCohortStatusQuery {
    pub cohort_id: CohortId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCohortStatusResult {
    pub cohort_id: CohortId,
    pub status: CohortStatus,
}

/// Reconciles on read, then reports the status.
pub struct GetCohortStatusHandler {
    repository: Arc<dyn CohortRepository>,
    lifecycle: Arc<CohortLifecycleManager>,
}

impl GetCohortStatusHandler {
    pub fn new(repository: Arc<dyn CohortRepository>, lifecycle: Arc<CohortLifecycleManager>) -> Self {
        Self {
            repository,
            lifecycle,
        }
    }

    pub async fn handle(&self, query: GetCohortStatusQuery) -> Result<GetCohortStatusResult, CohortError> {
        let cohort = self
            .repository
            .find_by_id(&query.cohort_id)
            .await?
            .ok_or(CohortError::NotFound(query.cohort_id))?;

        let (cohort, _) = reconcile_and_persist(self.repository.as_ref(), &self.lifecycle, cohort).await?;
        Ok(GetCohortStatusResult {
            cohort_id: cohort.id,
            status: cohort.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCohortRepository;
    use crate::adapters::system::{FixedClock, FixedTimezone};
    use crate::domain::cohort::Cohort;
    use crate::domain::foundation::{CourseId, Timestamp};
    use crate::domain::schedule::{CalendarAnchor, DstPolicy, ReleaseTimeCalculator, TimezoneResolver};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[tokio::test]
    async fn status_follows_the_clock() {
        let clock = Arc::new(FixedClock::at(ts("2023-12-31T00:00:00Z")));
        let resolver = TimezoneResolver::new(Arc::new(FixedTimezone::new(None)), clock.clone());
        let calculator = ReleaseTimeCalculator::new(resolver, DstPolicy::default(), CalendarAnchor::Canonical);
        let lifecycle = Arc::new(CohortLifecycleManager::new(clock.clone(), calculator));

        let repo = Arc::new(InMemoryCohortRepository::new());
        let start = ts("2024-01-01T00:00:00Z");
        let c = Cohort::new(CohortId::new(), CourseId::new(), "Winter", start, start.add_weeks(4), 5, start)
            .unwrap();
        repo.insert(c.clone()).await;
        let handler = GetCohortStatusHandler::new(repo.clone(), lifecycle);
        let query = GetCohortStatusQuery { cohort_id: c.id };

        assert_eq!(handler.handle(query.clone()).await.unwrap().status, CohortStatus::Upcoming);
        assert_eq!(repo.status_write_count(), 0);

        clock.set(ts("2024-01-02T00:00:00Z"));
        assert_eq!(handler.handle(query.clone()).await.unwrap().status, CohortStatus::Active);

        clock.set(ts("2024-02-01T00:00:00Z"));
        assert_eq!(handler.handle(query).await.unwrap().status, CohortStatus::Completed);
        assert_eq!(repo.status_write_count(), 2);
    }

    #[tokio::test]
    async fn malformed_cohort_row_is_reported() {
        let clock = Arc::new(FixedClock::at(ts("2024-01-02T00:00:00Z")));
        let resolver = TimezoneResolver::new(Arc::new(FixedTimezone::new(None)), clock.clone());
        let calculator = ReleaseTimeCalculator::new(resolver, DstPolicy::default(), CalendarAnchor::Canonical);
        let lifecycle = Arc::new(CohortLifecycleManager::new(clock, calculator));

        let repo = Arc::new(InMemoryCohortRepository::new());
        let id = CohortId::new();
        repo.mark_corrupt(id).await;

        let err = GetCohortStatusHandler::new(repo, lifecycle)
            .handle(GetCohortStatusQuery { cohort_id: id })
            .await
            .unwrap_err();
        assert!(matches!(err, CohortError::Store(ref e) if e.is_malformed_data()));
    }
}
