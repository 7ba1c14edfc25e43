//! Outcome of a release availability check.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::humanize::{format_release_time, time_until, AVAILABLE_NOW, RELEASE_TIME_UNAVAILABLE};
use super::policy::FailurePolicy;
use crate::domain::foundation::Timestamp;

/// What decided an availability outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseSource {
    /// Administrator released the lesson early.
    ManualOverride,
    /// Per-student schedule derived from the lesson release record.
    LessonSchedule,
    /// Cohort weekly cadence (legacy fallback).
    CohortWeek,
    /// No schedule applies; lessons without one are open.
    Ungated,
    /// The release instant could not be computed; the failure policy decided.
    FailurePolicy,
}

/// Availability of one lesson for one student at one instant.
///
/// The display strings are rendered together with the boolean so callers
/// never mix results from two clock readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAvailability {
    pub available: bool,
    pub source: ReleaseSource,

    /// The student's release instant, when one was computed.
    pub student_release_at: Option<Timestamp>,

    pub time_until_release: String,
    pub formatted_release_time: String,
}

impl ReleaseAvailability {
    /// Open with no pending release instant.
    pub fn open(source: ReleaseSource) -> Self {
        Self {
            available: true,
            source,
            student_release_at: None,
            time_until_release: AVAILABLE_NOW.to_string(),
            formatted_release_time: AVAILABLE_NOW.to_string(),
        }
    }

    /// Decided by comparing `now` against a computed release instant.
    pub fn scheduled(
        source: ReleaseSource,
        release_at: Timestamp,
        zone: Tz,
        now: Timestamp,
    ) -> Self {
        if now >= release_at {
            return Self {
                student_release_at: Some(release_at),
                ..Self::open(source)
            };
        }

        let local: DateTime<Tz> = release_at.as_datetime().with_timezone(&zone);
        Self {
            available: false,
            source,
            student_release_at: Some(release_at),
            time_until_release: time_until(now, release_at),
            formatted_release_time: format_release_time(&local),
        }
    }

    /// Outcome when no release instant could be computed.
    pub fn from_failure(policy: FailurePolicy) -> Self {
        if policy.grants_access() {
            Self::open(ReleaseSource::FailurePolicy)
        } else {
            Self::withheld()
        }
    }

    /// Locked because the failure policy is closed and nothing was computed.
    pub fn withheld() -> Self {
        Self {
            available: false,
            source: ReleaseSource::FailurePolicy,
            student_release_at: None,
            time_until_release: RELEASE_TIME_UNAVAILABLE.to_string(),
            formatted_release_time: RELEASE_TIME_UNAVAILABLE.to_string(),
        }
    }
}
