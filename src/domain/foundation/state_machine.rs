//! State machine trait for lifecycle status enums.
//!
//! Used by `CohortStatus` so that derived status writes can be checked
//! against the allowed lifecycle before they reach storage.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list the allowed transitions; the checked
/// `transition_to` comes for free.
///
/// ```ignore
/// let next = CohortStatus::Upcoming.transition_to(CohortStatus::Active)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
