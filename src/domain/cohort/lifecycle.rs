//! Cohort lifecycle: status derivation, week index, and next-release countdown.
//!
//! Status is reconciled on read. Nothing here runs on a timer and nothing
//! here touches storage; handlers persist whatever [`Reconciliation`] says.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Cohort, CohortStatus};
use crate::domain::foundation::{StateMachine, Timestamp, ValidationError};
use crate::domain::schedule::{ReleaseError, ReleaseTimeCalculator};
use crate::ports::Clock;

const SECONDS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// Time left until the next weekly release, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    pub fn from_remaining(remaining: Duration) -> Self {
        if remaining <= Duration::zero() {
            return Self::default();
        }
        Self {
            days: remaining.num_days(),
            hours: remaining.num_hours() % 24,
            minutes: remaining.num_minutes() % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of reconciling a cohort's stored status with its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Stored status already matches.
    Unchanged(CohortStatus),
    /// Stored status differs from the dates; needs one write.
    Transitioned { from: CohortStatus, to: CohortStatus },
    /// Cancelled cohorts keep their status.
    SkippedCancelled,
}

impl Reconciliation {
    pub fn requires_write(&self) -> bool {
        matches!(self, Reconciliation::Transitioned { .. })
    }
}

/// Derives cohort status, week and countdown from the clock.
#[derive(Debug, Clone)]
pub struct CohortLifecycleManager {
    clock: Arc<dyn Clock>,
    calculator: ReleaseTimeCalculator,
}

impl CohortLifecycleManager {
    pub fn new(clock: Arc<dyn Clock>, calculator: ReleaseTimeCalculator) -> Self {
        Self { clock, calculator }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Date-derived status at `now`. Ignores the stored status.
    pub fn status(&self, cohort: &Cohort, now: Timestamp) -> CohortStatus {
        derive_status(cohort, now)
    }

    /// Zero-based week index; 0 before and during the first week.
    pub fn current_week(&self, cohort: &Cohort, now: Timestamp) -> u32 {
        let elapsed = now.duration_since(&cohort.start_date).num_seconds();
        if elapsed <= 0 {
            return 0;
        }
        u32::try_from(elapsed / SECONDS_PER_WEEK).unwrap_or(u32::MAX)
    }

    /// What reconciling `cohort` at `now` would do, without mutating it.
    ///
    /// The derived status always wins over a stale stored one, in either
    /// direction. Only `Cancelled` is left alone.
    pub fn plan(&self, cohort: &Cohort, now: Timestamp) -> Result<Reconciliation, ValidationError> {
        if cohort.status == CohortStatus::Cancelled {
            return Ok(Reconciliation::SkippedCancelled);
        }

        let derived = derive_status(cohort, now);
        if derived == cohort.status {
            return Ok(Reconciliation::Unchanged(derived));
        }

        let to = cohort.status.transition_to(derived)?;
        Ok(Reconciliation::Transitioned {
            from: cohort.status,
            to,
        })
    }

    /// Brings the in-memory cohort's status in line with the clock.
    ///
    /// Calling this twice in a row yields `Unchanged` the second time.
    pub fn reconcile(&self, cohort: &mut Cohort) -> Result<Reconciliation, ValidationError> {
        let now = self.clock.now();
        let outcome = self.plan(cohort, now)?;
        if let Reconciliation::Transitioned { to, .. } = outcome {
            cohort.apply_status(to, now)?;
        }
        Ok(outcome)
    }

    /// Instant of the release after `current_week`, in the student's zone.
    pub fn next_release_at(
        &self,
        cohort: &Cohort,
        current_week: u32,
        student_timezone: &str,
    ) -> Result<Timestamp, ReleaseError> {
        let week_start = cohort
            .start_date
            .checked_add_weeks(i64::from(current_week) + 1)
            .ok_or_else(|| {
                ReleaseError::malformed(format!("week {} of cohort {} is out of range", current_week, cohort.id))
            })?;
        let next = self
            .calculator
            .compute_at(week_start, student_timezone, cohort.weekly_release_local_time)?;

        debug!(
            cohort_id = %cohort.id,
            current_week,
            next = %next,
            "Computed next cohort release"
        );
        Ok(next)
    }

    pub fn countdown_to_next_release(
        &self,
        cohort: &Cohort,
        current_week: u32,
        student_timezone: &str,
    ) -> Result<Countdown, ReleaseError> {
        let next = self.next_release_at(cohort, current_week, student_timezone)?;
        Ok(Countdown::from_remaining(next.duration_since(&self.clock.now())))
    }
}

fn derive_status(cohort: &Cohort, now: Timestamp) -> CohortStatus {
    if now >= cohort.end_date {
        CohortStatus::Completed
    } else if now >= cohort.start_date {
        CohortStatus::Active
    } else {
        CohortStatus::Upcoming
    }
}
