//! Cohort lifecycle status.
//!
//! `Upcoming`, `Active` and `Completed` are derived from the cohort's
//! dates. `Cancelled` is set by administrators only and is terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortStatus {
    /// Before the start date.
    Upcoming,
    /// Between start (inclusive) and end (exclusive).
    Active,
    /// At or after the end date.
    Completed,
    /// Withdrawn by an administrator.
    Cancelled,
}

impl CohortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CohortStatus::Upcoming => "upcoming",
            CohortStatus::Active => "active",
            CohortStatus::Completed => "completed",
            CohortStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this status is computed from dates rather than set by hand.
    pub fn is_date_derived(&self) -> bool {
        !matches!(self, CohortStatus::Cancelled)
    }
}

impl StateMachine for CohortStatus {
    /// Dates are authoritative for the derived statuses, so any move among
    /// them is allowed, including back to `Active` after an end date is
    /// extended. `Cancelled` is reachable from all of them and never left.
    fn can_transition_to(&self, target: &Self) -> bool {
        self != target && self.is_date_derived()
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CohortStatus::*;
        [Upcoming, Active, Completed, Cancelled]
            .into_iter()
            .filter(|target| self.can_transition_to(target))
            .collect()
    }
}

impl fmt::Display for CohortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CohortStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(CohortStatus::Upcoming),
            "active" => Ok(CohortStatus::Active),
            "completed" => Ok(CohortStatus::Completed),
            "cancelled" => Ok(CohortStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown cohort status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_allowed() {
        assert_eq!(
            CohortStatus::Upcoming.transition_to(CohortStatus::Active),
            Ok(CohortStatus::Active)
        );
        assert!(CohortStatus::Upcoming.can_transition_to(&CohortStatus::Completed));
        assert!(CohortStatus::Active.can_transition_to(&CohortStatus::Completed));
    }

    #[test]
    fn date_edits_can_move_status_back() {
        assert_eq!(
            CohortStatus::Completed.transition_to(CohortStatus::Active),
            Ok(CohortStatus::Active)
        );
        assert!(CohortStatus::Active.can_transition_to(&CohortStatus::Upcoming));
    }

    #[test]
    fn cancelled_is_the_only_terminal_status() {
        assert!(CohortStatus::Cancelled.is_terminal());
        assert!(CohortStatus::Cancelled.transition_to(CohortStatus::Active).is_err());
        assert!(!CohortStatus::Completed.is_terminal());
        assert!(!CohortStatus::Upcoming.is_terminal());
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(CohortStatus::Active.transition_to(CohortStatus::Active).is_err());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in [
            CohortStatus::Upcoming,
            CohortStatus::Active,
            CohortStatus::Completed,
            CohortStatus::Cancelled,
        ] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }

    #[test]
    fn parses_stored_strings() {
        assert_eq!("ACTIVE".parse::<CohortStatus>().unwrap(), CohortStatus::Active);
        assert_eq!(CohortStatus::Cancelled.to_string(), "cancelled");
        assert!("paused".parse::<CohortStatus>().is_err());
    }

    #[test]
    fn only_cancelled_is_manual() {
        assert!(CohortStatus::Active.is_date_derived());
        assert!(!CohortStatus::Cancelled.is_date_derived());
    }
}
