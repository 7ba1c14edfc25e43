//! Release gating configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::schedule::{
    AmbiguousPolicy, CalendarAnchor, DstPolicy, FailurePolicy, LocalReleaseTime, NonexistentPolicy,
};

/// Release gating configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseConfig {
    /// What to do when a release instant cannot be computed
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Local time of day lessons unlock, `HH:MM`
    #[serde(default = "default_release_time")]
    pub default_release_time: String,

    /// Placement of release times skipped by a spring-forward transition
    #[serde(default)]
    pub nonexistent_policy: NonexistentPolicy,

    /// Placement of release times repeated by a fall-back transition
    #[serde(default)]
    pub ambiguous_policy: AmbiguousPolicy,

    /// Which calendar day a canonical release instant names
    #[serde(default)]
    pub calendar_anchor: CalendarAnchor,

    /// Gate lessons without a release record by cohort week
    #[serde(default)]
    pub cohort_week_fallback: bool,
}

impl ReleaseConfig {
    /// Parsed `default_release_time`.
    pub fn release_time(&self) -> Result<LocalReleaseTime, ValidationError> {
        LocalReleaseTime::parse(&self.default_release_time)
            .map_err(|_| ValidationError::InvalidReleaseTime(self.default_release_time.clone()))
    }

    pub fn dst_policy(&self) -> DstPolicy {
        DstPolicy::new(self.nonexistent_policy, self.ambiguous_policy)
    }

    /// Validate release configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.release_time().map(|_| ())
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            default_release_time: default_release_time(),
            nonexistent_policy: NonexistentPolicy::default(),
            ambiguous_policy: AmbiguousPolicy::default(),
            calendar_anchor: CalendarAnchor::default(),
            cohort_week_fallback: false,
        }
    }
}

fn default_release_time() -> String {
    "08:00".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_config_defaults() {
        let config = ReleaseConfig::default();
        assert_eq!(config.failure_policy, FailurePolicy::Open);
        assert_eq!(config.release_time().unwrap().to_string(), "08:00");
        assert_eq!(config.calendar_anchor, CalendarAnchor::Canonical);
        assert!(!config.cohort_week_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dst_policy_from_fields() {
        let config = ReleaseConfig {
            nonexistent_policy: NonexistentPolicy::ShiftForward,
            ambiguous_policy: AmbiguousPolicy::Latest,
            ..Default::default()
        };
        assert_eq!(
            config.dst_policy(),
            DstPolicy::new(NonexistentPolicy::ShiftForward, AmbiguousPolicy::Latest)
        );
    }

    #[test]
    fn test_validation_bad_release_time() {
        for bad in ["8am", "24:00", "08:60", ""] {
            let config = ReleaseConfig {
                default_release_time: bad.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_deserializes_snake_case_policies() {
        let config: ReleaseConfig = serde_json::from_str(
            r#"{"failure_policy":"closed","nonexistent_policy":"shift_forward","calendar_anchor":"student_local"}"#,
        )
        .unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Closed);
        assert_eq!(config.nonexistent_policy, NonexistentPolicy::ShiftForward);
        assert_eq!(config.calendar_anchor, CalendarAnchor::StudentLocal);
        assert_eq!(config.default_release_time, "08:00");
    }
}
