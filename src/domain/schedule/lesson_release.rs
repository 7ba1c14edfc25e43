//! Lesson release record.
//!
//! One record per (lesson, cohort). No record means the lesson is ungated.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CohortId, LessonId, Timestamp};

/// Release schedule entry for a lesson within a cohort.
///
/// # Invariants
///
/// - At most one record exists per (`lesson_id`, `cohort_id`)
/// - `is_released` only ever goes from false to true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRelease {
    pub lesson_id: LessonId,
    pub cohort_id: CohortId,

    /// Reference instant; each student's release is derived from it.
    pub canonical_release_date: Timestamp,

    /// Cohort week this lesson belongs to, when known.
    pub week_number: Option<u32>,

    is_released: bool,
    released_at: Option<Timestamp>,
}

impl LessonRelease {
    /// Creates a scheduled, not yet force-released, record.
    pub fn scheduled(lesson_id: LessonId, cohort_id: CohortId, canonical_release_date: Timestamp) -> Self {
        Self {
            lesson_id,
            cohort_id,
            canonical_release_date,
            week_number: None,
            is_released: false,
            released_at: None,
        }
    }

    /// Rebuilds a record from storage.
    pub fn restore(
        lesson_id: LessonId,
        cohort_id: CohortId,
        canonical_release_date: Timestamp,
        week_number: Option<u32>,
        is_released: bool,
        released_at: Option<Timestamp>,
    ) -> Self {
        Self {
            lesson_id,
            cohort_id,
            canonical_release_date,
            week_number,
            is_released,
            released_at,
        }
    }

    pub fn with_week(mut self, week_number: u32) -> Self {
        self.week_number = Some(week_number);
        self
    }

    /// Whether an administrator has released this lesson early.
    pub fn is_released(&self) -> bool {
        self.is_released
    }

    pub fn released_at(&self) -> Option<Timestamp> {
        self.released_at
    }

    /// Applies the manual override.
    ///
    /// Returns `false` if the lesson was already released; the original
    /// `released_at` is kept.
    pub fn force_release(&mut self, at: Timestamp) -> bool {
        if self.is_released {
            return false;
        }
        self.is_released = true;
        self.released_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn scheduled_record_is_not_released() {
        let release = LessonRelease::scheduled(LessonId::new(), CohortId::new(), ts("2024-01-08T00:00:00Z"));
        assert!(!release.is_released());
        assert_eq!(release.released_at(), None);
        assert_eq!(release.week_number, None);
    }

    #[test]
    fn force_release_is_one_way_and_keeps_first_timestamp() {
        let mut release =
            LessonRelease::scheduled(LessonId::new(), CohortId::new(), ts("2099-01-01T00:00:00Z"));

        assert!(release.force_release(ts("2024-01-02T00:00:00Z")));
        assert!(!release.force_release(ts("2024-02-02T00:00:00Z")));

        assert!(release.is_released());
        assert_eq!(release.released_at(), Some(ts("2024-01-02T00:00:00Z")));
    }

    #[test]
    fn with_week_sets_week_number() {
        let release = LessonRelease::scheduled(LessonId::new(), CohortId::new(), ts("2024-01-08T00:00:00Z"))
            .with_week(2);
        assert_eq!(release.week_number, Some(2));
    }
}
