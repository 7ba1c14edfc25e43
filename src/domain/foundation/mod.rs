//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! shared by the schedule and cohort modules.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CohortId, CourseId, LessonId, StudentId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
