//! Assembly of the release services from configuration.
//!
//! Builds the resolver, calculator, evaluator, gate and lifecycle manager
//! once so every handler shares the same policies and clock.

use std::sync::Arc;

use crate::config::{ReleaseConfig, ValidationError};
use crate::domain::cohort::CohortLifecycleManager;
use crate::domain::schedule::{
    CohortWeekGate, FailurePolicy, LessonReleaseGate, ReleaseAvailabilityEvaluator,
    ReleaseTimeCalculator, ScheduleGate, TimezoneResolver,
};
use crate::ports::{Clock, PlatformTimezone};

#[derive(Debug, Clone)]
pub struct ReleaseComponents {
    pub clock: Arc<dyn Clock>,
    pub resolver: TimezoneResolver,
    pub calculator: ReleaseTimeCalculator,
    pub evaluator: ReleaseAvailabilityEvaluator,
    pub gate: Arc<ScheduleGate>,
    pub lifecycle: Arc<CohortLifecycleManager>,
    pub failure_policy: FailurePolicy,
}

impl ReleaseComponents {
    /// # Errors
    ///
    /// `InvalidReleaseTime` if `default_release_time` is not `HH:MM`.
    pub fn from_config(
        config: &ReleaseConfig,
        clock: Arc<dyn Clock>,
        platform: Arc<dyn PlatformTimezone>,
    ) -> Result<Self, ValidationError> {
        let release_time = config.release_time()?;

        let resolver = TimezoneResolver::new(platform, clock.clone());
        let calculator =
            ReleaseTimeCalculator::new(resolver.clone(), config.dst_policy(), config.calendar_anchor);
        let evaluator = ReleaseAvailabilityEvaluator::new(
            calculator.clone(),
            clock.clone(),
            release_time,
            config.failure_policy,
        );
        let gate = ScheduleGate::new(
            LessonReleaseGate::new(evaluator.clone()),
            CohortWeekGate::new(calculator.clone(), config.failure_policy),
            config.cohort_week_fallback,
        );
        let lifecycle = CohortLifecycleManager::new(clock.clone(), calculator.clone());

        Ok(Self {
            clock,
            resolver,
            calculator,
            evaluator,
            gate: Arc::new(gate),
            lifecycle: Arc::new(lifecycle),
            failure_policy: config.failure_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::system::{FixedClock, FixedTimezone};
    use crate::domain::foundation::Timestamp;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(Timestamp::parse_rfc3339("2024-01-08T00:00:00Z").unwrap()))
    }

    #[test]
    fn builds_from_default_config() {
        let components = ReleaseComponents::from_config(
            &ReleaseConfig::default(),
            clock(),
            Arc::new(FixedTimezone::reporting("Europe/Paris")),
        )
        .unwrap();

        assert_eq!(components.failure_policy, FailurePolicy::Open);
        assert!(!components.gate.uses_cohort_week_fallback());
        assert_eq!(components.resolver.detect(), "Europe/Paris");
    }

    #[test]
    fn rejects_unparseable_release_time() {
        let config = ReleaseConfig {
            default_release_time: "eight".to_string(),
            ..Default::default()
        };
        let result = ReleaseComponents::from_config(&config, clock(), Arc::new(FixedTimezone::new(None)));
        assert!(matches!(result, Err(ValidationError::InvalidReleaseTime(_))));
    }

    #[test]
    fn evaluator_uses_configured_release_time() {
        let config = ReleaseConfig {
            default_release_time: "17:30".to_string(),
            ..Default::default()
        };
        let components =
            ReleaseComponents::from_config(&config, clock(), Arc::new(FixedTimezone::new(None))).unwrap();

        let release = crate::domain::schedule::LessonRelease::scheduled(
            crate::domain::foundation::LessonId::new(),
            crate::domain::foundation::CohortId::new(),
            Timestamp::parse_rfc3339("2024-01-08T00:00:00Z").unwrap(),
        );
        let view = components.evaluator.evaluate(&release, "UTC");
        assert_eq!(
            view.student_release_at,
            Some(Timestamp::parse_rfc3339("2024-01-08T17:30:00Z").unwrap())
        );
    }
}
