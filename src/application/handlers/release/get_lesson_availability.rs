//! GetLessonAvailabilityHandler - Query handler for per-student lesson visibility.
//!
//! Loads the lesson's release record (and, when the cohort-week fallback
//! is on, the cohort) and asks the [`ScheduleGate`] for a decision.
//!
//! Store outages propagate. Rows the store cannot decode are handled by the
//! configured failure policy, the same as an uncomputable release time.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::cohort::Cohort;
use crate::domain::foundation::{CohortId, DomainError, LessonId, StudentId, Timestamp};
use crate::domain::schedule::{
    FailurePolicy, LessonContext, LessonRelease, ReleaseAvailability, ReleaseQueryError,
    ScheduleGate, FALLBACK_TIMEZONE,
};
use crate::ports::{Clock, CohortRepository, EnrollmentRepository, LessonReleaseRepository};

/// Query for a lesson's availability in a given timezone.
#[derive(Debug, Clone)]
pub struct GetLessonAvailabilityQuery {
    pub lesson_id: LessonId,
    pub cohort_id: CohortId,
    pub student_timezone: String,
    /// Cohort week of the lesson, for the cohort-week fallback.
    pub lesson_week: Option<u32>,
}

impl GetLessonAvailabilityQuery {
    pub fn new(lesson_id: LessonId, cohort_id: CohortId, student_timezone: impl Into<String>) -> Self {
        Self {
            lesson_id,
            cohort_id,
            student_timezone: student_timezone.into(),
            lesson_week: None,
        }
    }

    pub fn in_week(mut self, week: u32) -> Self {
        self.lesson_week = Some(week);
        self
    }
}

/// Query resolved through the student's enrollment timezone.
#[derive(Debug, Clone)]
pub struct StudentLessonAvailabilityQuery {
    pub student_id: StudentId,
    pub lesson_id: LessonId,
    pub cohort_id: CohortId,
    pub lesson_week: Option<u32>,
}

/// Availability of one lesson for one student, with display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonAvailabilityView {
    pub lesson_id: LessonId,
    pub cohort_id: CohortId,
    pub student_timezone: String,
    pub checked_at: Timestamp,
    #[serde(flatten)]
    pub availability: ReleaseAvailability,
}

pub type GetLessonAvailabilityResult = LessonAvailabilityView;

pub struct GetLessonAvailabilityHandler {
    releases: Arc<dyn LessonReleaseRepository>,
    cohorts: Arc<dyn CohortRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    gate: Arc<ScheduleGate>,
    clock: Arc<dyn Clock>,
    failure_policy: FailurePolicy,
}

impl GetLessonAvailabilityHandler {
    pub fn new(
        releases: Arc<dyn LessonReleaseRepository>,
        cohorts: Arc<dyn CohortRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        gate: Arc<ScheduleGate>,
        clock: Arc<dyn Clock>,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            releases,
            cohorts,
            enrollments,
            gate,
            clock,
            failure_policy,
        }
    }

    pub async fn handle(
        &self,
        query: GetLessonAvailabilityQuery,
    ) -> Result<GetLessonAvailabilityResult, ReleaseQueryError> {
        let now = self.clock.now();

        let release = match self.load_release(&query).await? {
            Loaded::Found(release) => release,
            Loaded::Malformed(err) => return Ok(self.view(&query, now, self.apply_policy(&query, &err))),
        };

        let cohort = match self.load_cohort_for_fallback(&query, release.as_ref()).await? {
            Loaded::Found(cohort) => cohort,
            Loaded::Malformed(err) => return Ok(self.view(&query, now, self.apply_policy(&query, &err))),
        };

        let mut ctx = LessonContext::default();
        if let Some(release) = release.as_ref() {
            ctx = LessonContext::for_release(release);
        }
        if let Some(cohort) = cohort.as_ref() {
            ctx = ctx.with_cohort(cohort);
        }
        if let Some(week) = query.lesson_week {
            ctx = ctx.with_week(week);
        }

        let availability = self.gate.decide(&ctx, &query.student_timezone, now);
        Ok(self.view(&query, now, availability))
    }

    /// Resolves the timezone from the student's enrollment, then evaluates.
    ///
    /// A student without an enrollment row is evaluated in UTC.
    pub async fn handle_for_student(
        &self,
        query: StudentLessonAvailabilityQuery,
    ) -> Result<GetLessonAvailabilityResult, ReleaseQueryError> {
        let enrollment = self
            .enrollments
            .find(&query.student_id, &query.cohort_id)
            .await?;

        let student_timezone = match enrollment {
            Some(enrollment) => enrollment.timezone_or_default().to_string(),
            None => {
                warn!(
                    student_id = %query.student_id,
                    cohort_id = %query.cohort_id,
                    "No enrollment for student, evaluating release in UTC"
                );
                FALLBACK_TIMEZONE.to_string()
            }
        };

        self.handle(GetLessonAvailabilityQuery {
            lesson_id: query.lesson_id,
            cohort_id: query.cohort_id,
            student_timezone,
            lesson_week: query.lesson_week,
        })
        .await
    }

    pub async fn is_available(&self, query: GetLessonAvailabilityQuery) -> Result<bool, ReleaseQueryError> {
        Ok(self.handle(query).await?.availability.available)
    }

    pub async fn time_until_release(
        &self,
        query: GetLessonAvailabilityQuery,
    ) -> Result<String, ReleaseQueryError> {
        Ok(self.handle(query).await?.availability.time_until_release)
    }

    pub async fn formatted_release_time(
        &self,
        query: GetLessonAvailabilityQuery,
    ) -> Result<String, ReleaseQueryError> {
        Ok(self.handle(query).await?.availability.formatted_release_time)
    }

    async fn load_release(
        &self,
        query: &GetLessonAvailabilityQuery,
    ) -> Result<Loaded<Option<LessonRelease>>, ReleaseQueryError> {
        let found = self.releases.find(&query.lesson_id, &query.cohort_id).await;
        Loaded::from_store(found)
    }

    async fn load_cohort_for_fallback(
        &self,
        query: &GetLessonAvailabilityQuery,
        release: Option<&LessonRelease>,
    ) -> Result<Loaded<Option<Cohort>>, ReleaseQueryError> {
        let week_known = query.lesson_week.is_some();
        if release.is_some() || !week_known || !self.gate.uses_cohort_week_fallback() {
            return Ok(Loaded::Found(None));
        }
        let found = self.cohorts.find_by_id(&query.cohort_id).await;
        Loaded::from_store(found)
    }

    fn apply_policy(&self, query: &GetLessonAvailabilityQuery, err: &DomainError) -> ReleaseAvailability {
        warn!(
            lesson_id = %query.lesson_id,
            cohort_id = %query.cohort_id,
            error = %err,
            policy = ?self.failure_policy,
            "Stored release data is malformed, applying failure policy"
        );
        ReleaseAvailability::from_failure(self.failure_policy)
    }

    fn view(
        &self,
        query: &GetLessonAvailabilityQuery,
        now: Timestamp,
        availability: ReleaseAvailability,
    ) -> LessonAvailabilityView {
        LessonAvailabilityView {
            lesson_id: query.lesson_id,
            cohort_id: query.cohort_id,
            student_timezone: query.student_timezone.clone(),
            checked_at: now,
            availability,
        }
    }
}

/// A store read that either succeeded or returned an undecodable row.
enum Loaded<T> {
    Found(T),
    Malformed(DomainError),
}

impl<T> Loaded<T> {
    fn from_store(result: Result<T, DomainError>) -> Result<Self, ReleaseQueryError> {
        match result {
            Ok(value) => Ok(Loaded::Found(value)),
            Err(err) if err.is_malformed_data() => Ok(Loaded::Malformed(err)),
            Err(err) => Err(ReleaseQueryError::Store(err)),
        }
    }
}
