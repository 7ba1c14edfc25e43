//! Release gates.
//!
//! Two mechanisms can hold a lesson back: a per-lesson release record, and
//! the cohort's weekly cadence. Both sit behind [`ReleaseGate`] so callers
//! ask one question and get one [`ReleaseAvailability`].
//!
//! A release record is authoritative whenever one exists. Without one, the
//! cohort-week gate is consulted only when the fallback is switched on and
//! the lesson's week is known. Everything else is open.

use tracing::warn;

use super::availability::{ReleaseAvailability, ReleaseSource};
use super::calculator::ReleaseTimeCalculator;
use super::errors::ReleaseError;
use super::evaluator::ReleaseAvailabilityEvaluator;
use super::lesson_release::LessonRelease;
use super::policy::FailurePolicy;
use crate::domain::cohort::Cohort;
use crate::domain::foundation::Timestamp;

/// What a gate knows about the lesson being checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct LessonContext<'a> {
    pub release: Option<&'a LessonRelease>,
    pub cohort: Option<&'a Cohort>,

    /// Zero-based cohort week of the lesson, when known.
    pub lesson_week: Option<u32>,
}

impl<'a> LessonContext<'a> {
    pub fn for_release(release: &'a LessonRelease) -> Self {
        Self {
            release: Some(release),
            cohort: None,
            lesson_week: release.week_number,
        }
    }

    pub fn with_cohort(mut self, cohort: &'a Cohort) -> Self {
        self.cohort = Some(cohort);
        self
    }

    pub fn with_week(mut self, week: u32) -> Self {
        self.lesson_week = Some(week);
        self
    }
}

/// A rule deciding whether a lesson is visible to a student at `now`.
pub trait ReleaseGate: Send + Sync {
    /// `None` when this gate has no opinion about the lesson.
    fn check(&self, ctx: &LessonContext<'_>, student_timezone: &str, now: Timestamp)
        -> Option<ReleaseAvailability>;
}

/// Per-lesson, per-student release records.
#[derive(Debug, Clone)]
pub struct LessonReleaseGate {
    evaluator: ReleaseAvailabilityEvaluator,
}

impl LessonReleaseGate {
    pub fn new(evaluator: ReleaseAvailabilityEvaluator) -> Self {
        Self { evaluator }
    }
}

impl ReleaseGate for LessonReleaseGate {
    fn check(
        &self,
        ctx: &LessonContext<'_>,
        student_timezone: &str,
        now: Timestamp,
    ) -> Option<ReleaseAvailability> {
        ctx.release
            .map(|release| self.evaluator.evaluate_at(release, student_timezone, now))
    }
}

/// Cohort weekly cadence: week `n` opens `n` weeks after the cohort start,
/// at the cohort's weekly local release time in the student's zone.
#[derive(Debug, Clone)]
pub struct CohortWeekGate {
    calculator: ReleaseTimeCalculator,
    failure_policy: FailurePolicy,
}

impl CohortWeekGate {
    pub fn new(calculator: ReleaseTimeCalculator, failure_policy: FailurePolicy) -> Self {
        Self {
            calculator,
            failure_policy,
        }
    }
}

impl ReleaseGate for CohortWeekGate {
    fn check(
        &self,
        ctx: &LessonContext<'_>,
        student_timezone: &str,
        now: Timestamp,
    ) -> Option<ReleaseAvailability> {
        let cohort = ctx.cohort?;
        let week = ctx.lesson_week?;

        let zone = self.calculator.resolver().resolve(student_timezone);
        let outcome = cohort
            .start_date
            .checked_add_weeks(i64::from(week))
            .ok_or_else(|| ReleaseError::malformed(format!("week {} is out of range", week)))
            .and_then(|week_start| {
                self.calculator
                    .compute_in_zone(week_start, zone, cohort.weekly_release_local_time)
            });

        Some(match outcome {
            Ok(opens_at) => ReleaseAvailability::scheduled(ReleaseSource::CohortWeek, opens_at, zone, now),
            Err(err) => {
                warn!(
                    cohort_id = %cohort.id,
                    week,
                    error = %err,
                    policy = ?self.failure_policy,
                    "Cohort week release could not be computed, applying failure policy"
                );
                ReleaseAvailability::from_failure(self.failure_policy)
            }
        })
    }
}

/// The gate handlers use: lesson records first, optional cohort-week fallback.
#[derive(Debug, Clone)]
pub struct ScheduleGate {
    lesson: LessonReleaseGate,
    cohort_week: CohortWeekGate,
    cohort_week_fallback: bool,
}

impl ScheduleGate {
    pub fn new(lesson: LessonReleaseGate, cohort_week: CohortWeekGate, cohort_week_fallback: bool) -> Self {
        Self {
            lesson,
            cohort_week,
            cohort_week_fallback,
        }
    }

    /// Whether lessons without a record are gated by cohort week.
    pub fn uses_cohort_week_fallback(&self) -> bool {
        self.cohort_week_fallback
    }

    /// Always produces a decision.
    pub fn decide(&self, ctx: &LessonContext<'_>, student_timezone: &str, now: Timestamp) -> ReleaseAvailability {
        self.check(ctx, student_timezone, now)
            .unwrap_or_else(|| ReleaseAvailability::open(ReleaseSource::Ungated))
    }
}

impl ReleaseGate for ScheduleGate {
    fn check(
        &self,
        ctx: &LessonContext<'_>,
        student_timezone: &str,
        now: Timestamp,
    ) -> Option<ReleaseAvailability> {
        if ctx.release.is_some() {
            return self.lesson.check(ctx, student_timezone, now);
        }
        if self.cohort_week_fallback {
            return self.cohort_week.check(ctx, student_timezone, now);
        }
        None
    }
}
