//! Student enrollment in a cohort.
//!
//! Only the fields the release logic reads are modeled; enrollment and
//! billing workflows live elsewhere.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{CohortId, StudentId, ValidationError};
use crate::domain::schedule::FALLBACK_TIMEZONE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Withdrawn,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Withdrawn => "withdrawn",
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(EnrollmentStatus::Active),
            "completed" => Ok(EnrollmentStatus::Completed),
            "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown enrollment status '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub cohort_id: CohortId,
    pub status: EnrollmentStatus,

    /// Timezone from the student profile, unvalidated.
    pub timezone: Option<String>,
}

impl Enrollment {
    pub fn new(student_id: StudentId, cohort_id: CohortId, timezone: Option<String>) -> Self {
        Self {
            student_id,
            cohort_id,
            status: EnrollmentStatus::Active,
            timezone,
        }
    }

    /// The profile timezone, or `"UTC"` when absent or blank.
    ///
    /// Identifiers that are present but unknown are passed through; the
    /// resolver downgrades them at computation time.
    pub fn timezone_or_default(&self) -> &str {
        match self.timezone.as_deref() {
            Some(tz) if !tz.trim().is_empty() => tz,
            _ => FALLBACK_TIMEZONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(tz: Option<&str>) -> Enrollment {
        Enrollment::new(
            StudentId::new("student-1").unwrap(),
            CohortId::new(),
            tz.map(str::to_string),
        )
    }

    #[test]
    fn absent_or_blank_timezone_defaults_to_utc() {
        assert_eq!(enrollment(None).timezone_or_default(), "UTC");
        assert_eq!(enrollment(Some("")).timezone_or_default(), "UTC");
    }

    #[test]
    fn present_timezone_is_passed_through() {
        assert_eq!(
            enrollment(Some("Asia/Tokyo")).timezone_or_default(),
            "Asia/Tokyo"
        );
        assert_eq!(
            enrollment(Some("Mars/Colony")).timezone_or_default(),
            "Mars/Colony"
        );
    }

    #[test]
    fn status_parses_from_storage() {
        assert_eq!("Withdrawn".parse::<EnrollmentStatus>().unwrap(), EnrollmentStatus::Withdrawn);
        assert!("paused".parse::<EnrollmentStatus>().is_err());
    }
}
