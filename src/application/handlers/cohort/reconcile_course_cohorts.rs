//! ReconcileCourseCohortsHandler - Reconciles every cohort of a course.
//!
//! Used on the cohort list load path, so listings never show a stale status.

use std::sync::Arc;

use super::reconcile_cohort::reconcile_and_persist;
use crate::domain::cohort::{Cohort, CohortError, CohortLifecycleManager};
use crate::domain::foundation::CourseId;
use crate::ports::CohortRepository;

#[derive(Debug, Clone)]
pub struct ReconcileCourseCohortsCommand {
    pub course_id: CourseId,
}

#[derive(Debug, Clone)]
pub struct ReconcileCourseCohortsResult {
    /// Cohorts ordered by start date, with reconciled statuses.
    pub cohorts: Vec<Cohort>,
    /// Number of status writes performed.
    pub updated: usize,
}

pub struct ReconcileCourseCohortsHandler {
    repository: Arc<dyn CohortRepository>,
    lifecycle: Arc<CohortLifecycleManager>,
}

impl ReconcileCourseCohortsHandler {
    pub fn new(repository: Arc<dyn CohortRepository>, lifecycle: Arc<CohortLifecycleManager>) -> Self {
        Self {
            repository,
            lifecycle,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcileCourseCohortsCommand,
    ) -> Result<ReconcileCourseCohortsResult, CohortError> {
        let loaded = self.repository.list_by_course(&cmd.course_id).await?;

        let mut cohorts = Vec::with_capacity(loaded.len());
        let mut updated = 0;
        for cohort in loaded {
            let (cohort, outcome) =
                reconcile_and_persist(self.repository.as_ref(), &self.lifecycle, cohort).await?;
            if outcome.requires_write() {
                updated += 1;
            }
            cohorts.push(cohort);
        }

        Ok(ReconcileCourseCohortsResult { cohorts, updated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCohortRepository;
    use crate::adapters::system::{FixedClock, FixedTimezone};
    use crate::domain::cohort::CohortStatus;
    use crate::domain::foundation::{CohortId, Timestamp};
    use crate::domain::schedule::{CalendarAnchor, DstPolicy, ReleaseTimeCalculator, TimezoneResolver};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn cohort(course: CourseId, start: &str) -> Cohort {
        let start = ts(start);
        Cohort::new(CohortId::new(), course, "Cohort", start, start.add_weeks(6), 20, start).unwrap()
    }

    #[tokio::test]
    async fn reconciles_each_cohort_once() {
        let clock = Arc::new(FixedClock::at(ts("2024-03-01T00:00:00Z")));
        let resolver = TimezoneResolver::new(Arc::new(FixedTimezone::new(None)), clock.clone());
        let calculator = ReleaseTimeCalculator::new(resolver, DstPolicy::default(), CalendarAnchor::Canonical);
        let lifecycle = Arc::new(CohortLifecycleManager::new(clock, calculator));

        let repo = Arc::new(InMemoryCohortRepository::new());
        let course = CourseId::new();
        repo.insert(cohort(course, "2024-01-01T00:00:00Z")).await; // completed
        repo.insert(cohort(course, "2024-02-19T00:00:00Z")).await; // active
        repo.insert(cohort(course, "2024-04-01T00:00:00Z")).await; // still upcoming

        let handler = ReconcileCourseCohortsHandler::new(repo.clone(), lifecycle);
        let first = handler.handle(ReconcileCourseCohortsCommand { course_id: course }).await.unwrap();
        let statuses: Vec<_> = first.cohorts.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![CohortStatus::Completed, CohortStatus::Active, CohortStatus::Upcoming]
        );
        assert_eq!(first.updated, 2);

        let second = handler.handle(ReconcileCourseCohortsCommand { course_id: course }).await.unwrap();
        assert_eq!(second.updated, 0);
        assert_eq!(repo.status_write_count(), 2);
    }
}
