//! Cohort aggregate entity.
//!
//! A cohort is a group of students moving through a course on a shared
//! calendar. Course administration owns every field except `status`,
//! which the lifecycle manager also rewrites from the dates.

use serde::{Deserialize, Serialize};

use super::CohortStatus;
use crate::domain::foundation::{CohortId, CourseId, StateMachine, Timestamp, ValidationError};
use crate::domain::schedule::LocalReleaseTime;

/// Cohort aggregate.
///
/// # Invariants
///
/// - `start_date < end_date`
/// - `status` only moves forward (see `CohortStatus`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    pub id: CohortId,
    pub course_id: CourseId,
    pub name: String,

    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub enrollment_deadline: Option<Timestamp>,

    pub max_students: u32,
    pub current_students: u32,

    /// Stored status; may be stale until reconciled.
    pub status: CohortStatus,

    /// Local time of day at which each week's content unlocks.
    #[serde(default)]
    pub weekly_release_local_time: LocalReleaseTime,

    pub is_active: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cohort {
    /// Creates an upcoming cohort with the default 08:00 release time.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `InvalidFormat` if `start_date` is not before `end_date`
    pub fn new(
        id: CohortId,
        course_id: CourseId,
        name: impl Into<String>,
        start_date: Timestamp,
        end_date: Timestamp,
        max_students: u32,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let cohort = Self {
            id,
            course_id,
            name,
            start_date,
            end_date,
            enrollment_deadline: None,
            max_students,
            current_students: 0,
            status: CohortStatus::Upcoming,
            weekly_release_local_time: LocalReleaseTime::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        cohort.validate()?;
        Ok(cohort)
    }

    pub fn with_enrollment_deadline(mut self, deadline: Timestamp) -> Self {
        self.enrollment_deadline = Some(deadline);
        self
    }

    pub fn with_weekly_release_time(mut self, time: LocalReleaseTime) -> Self {
        self.weekly_release_local_time = time;
        self
    }

    /// Checks the date invariant; used for records loaded from storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.start_date.is_before(&self.end_date) {
            return Err(ValidationError::invalid_format(
                "end_date",
                "end_date must be after start_date",
            ));
        }
        Ok(())
    }

    pub fn has_capacity(&self) -> bool {
        self.current_students < self.max_students
    }

    /// Whether new students can join at `now`.
    pub fn is_enrollment_open(&self, now: Timestamp) -> bool {
        let deadline_ok = self
            .enrollment_deadline
            .map_or(true, |deadline| !now.is_after(&deadline));

        self.is_active
            && matches!(self.status, CohortStatus::Upcoming | CohortStatus::Active)
            && now.is_before(&self.end_date)
            && deadline_ok
            && self.has_capacity()
    }

    /// Moves to `status`, validating the lifecycle.
    ///
    /// Returns `false` without touching `updated_at` when already there.
    pub fn apply_status(&mut self, status: CohortStatus, now: Timestamp) -> Result<bool, ValidationError> {
        if self.status == status {
            return Ok(false);
        }
        self.status = self.status.transition_to(status)?;
        self.updated_at = now;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn cohort() -> Cohort {
        Cohort::new(
            CohortId::new(),
            CourseId::new(),
            "Spring 2024",
            ts("2024-01-01T00:00:00Z"),
            ts("2024-03-01T00:00:00Z"),
            2,
            ts("2023-12-01T00:00:00Z"),
        )
        .unwrap()
    }

    #[test]
    fn new_cohort_is_upcoming_with_default_release_time() {
        let c = cohort();
        assert_eq!(c.status, CohortStatus::Upcoming);
        assert_eq!(c.weekly_release_local_time.to_string(), "08:00");
        assert!(c.is_active);
    }

    #[test]
    fn rejects_end_before_start() {
        let result = Cohort::new(
            CohortId::new(),
            CourseId::new(),
            "Backwards",
            ts("2024-03-01T00:00:00Z"),
            ts("2024-01-01T00:00:00Z"),
            10,
            ts("2023-12-01T00:00:00Z"),
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn rejects_equal_dates_and_blank_name() {
        let same = ts("2024-01-01T00:00:00Z");
        assert!(Cohort::new(CohortId::new(), CourseId::new(), "x", same, same, 1, same).is_err());
        assert!(matches!(
            Cohort::new(
                CohortId::new(),
                CourseId::new(),
                "  ",
                same,
                same.add_days(1),
                1,
                same
            ),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn enrollment_closes_at_deadline_and_capacity() {
        let mut c = cohort().with_enrollment_deadline(ts("2024-01-10T00:00:00Z"));
        assert!(c.is_enrollment_open(ts("2024-01-05T00:00:00Z")));
        assert!(!c.is_enrollment_open(ts("2024-01-11T00:00:00Z")));

        c.current_students = 2;
        assert!(!c.has_capacity());
        assert!(!c.is_enrollment_open(ts("2024-01-05T00:00:00Z")));
    }

    #[test]
    fn enrollment_closed_when_cancelled_or_inactive() {
        let mut c = cohort();
        c.is_active = false;
        assert!(!c.is_enrollment_open(ts("2023-12-15T00:00:00Z")));

        let mut c = cohort();
        c.status = CohortStatus::Cancelled;
        assert!(!c.is_enrollment_open(ts("2023-12-15T00:00:00Z")));
    }

    #[test]
    fn apply_status_updates_timestamp_only_on_change() {
        let mut c = cohort();
        let now = ts("2024-01-02T00:00:00Z");

        assert_eq!(c.apply_status(CohortStatus::Active, now), Ok(true));
        assert_eq!(c.updated_at, now);

        let later = ts("2024-01-03T00:00:00Z");
        assert_eq!(c.apply_status(CohortStatus::Active, later), Ok(false));
        assert_eq!(c.updated_at, now);
    }

    #[test]
    fn apply_status_never_leaves_cancelled() {
        let mut c = cohort();
        c.status = CohortStatus::Cancelled;
        assert!(c.apply_status(CohortStatus::Active, ts("2024-01-02T00:00:00Z")).is_err());
        assert_eq!(c.status, CohortStatus::Cancelled);
    }
}
