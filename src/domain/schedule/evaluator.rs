//! Release availability evaluation for a single lesson and student.
//!
//! Rules, in order:
//!
//! 1. A manual override (`is_released`) opens the lesson unconditionally.
//! 2. Otherwise the lesson opens once `now` reaches the student's release
//!    instant from [`ReleaseTimeCalculator`].
//! 3. If that instant cannot be computed, the [`FailurePolicy`] decides.

use std::sync::Arc;

use tracing::warn;

use super::availability::{ReleaseAvailability, ReleaseSource};
use super::calculator::ReleaseTimeCalculator;
use super::lesson_release::LessonRelease;
use super::local_time::LocalReleaseTime;
use super::policy::FailurePolicy;
use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Decides whether a lesson release is visible to a student.
#[derive(Debug, Clone)]
pub struct ReleaseAvailabilityEvaluator {
    calculator: ReleaseTimeCalculator,
    clock: Arc<dyn Clock>,
    release_time: LocalReleaseTime,
    failure_policy: FailurePolicy,
}

impl ReleaseAvailabilityEvaluator {
    pub fn new(
        calculator: ReleaseTimeCalculator,
        clock: Arc<dyn Clock>,
        release_time: LocalReleaseTime,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            calculator,
            clock,
            release_time,
            failure_policy,
        }
    }

    pub fn calculator(&self) -> &ReleaseTimeCalculator {
        &self.calculator
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Current instant according to the injected clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Whether the lesson is visible to a student in `student_timezone` now.
    pub fn is_available(&self, release: &LessonRelease, student_timezone: &str) -> bool {
        self.evaluate(release, student_timezone).available
    }

    /// `"Available now"`, or a relative countdown such as `"in 5 hours"`.
    pub fn time_until_release(&self, release: &LessonRelease, student_timezone: &str) -> String {
        self.evaluate(release, student_timezone).time_until_release
    }

    /// `"Available now"`, or a local date such as `"Monday, January 8th at 8:00 AM"`.
    pub fn formatted_release_time(&self, release: &LessonRelease, student_timezone: &str) -> String {
        self.evaluate(release, student_timezone).formatted_release_time
    }

    pub fn evaluate(&self, release: &LessonRelease, student_timezone: &str) -> ReleaseAvailability {
        self.evaluate_at(release, student_timezone, self.clock.now())
    }

    /// Full evaluation against an explicit instant.
    pub fn evaluate_at(
        &self,
        release: &LessonRelease,
        student_timezone: &str,
        now: Timestamp,
    ) -> ReleaseAvailability {
        if release.is_released() {
            return ReleaseAvailability::open(ReleaseSource::ManualOverride);
        }

        let zone = self.calculator.resolver().resolve(student_timezone);
        match self
            .calculator
            .compute_in_zone(release.canonical_release_date, zone, self.release_time)
        {
            Ok(release_at) => {
                ReleaseAvailability::scheduled(ReleaseSource::LessonSchedule, release_at, zone, now)
            }
            Err(err) => {
                warn!(
                    lesson_id = %release.lesson_id,
                    cohort_id = %release.cohort_id,
                    error = %err,
                    policy = ?self.failure_policy,
                    "Release time computation failed, applying failure policy"
                );
                ReleaseAvailability::from_failure(self.failure_policy)
            }
        }
    }

    /// Outcome for a release record the store could not decode.
    pub fn malformed_record(&self) -> ReleaseAvailability {
        ReleaseAvailability::from_failure(self.failure_policy)
    }
}
