//! Release handlers.
//!
//! ## Commands
//! - Force-releasing a lesson (administrator override)
//!
//! ## Queries
//! - Lesson availability for a student, with countdown and local release time

mod force_release_lesson;
mod get_lesson_availability;

// Commands
pub use force_release_lesson::{
    ForceReleaseLessonCommand, ForceReleaseLessonHandler, ForceReleaseLessonResult,
};

// Queries
pub use get_lesson_availability::{
    GetLessonAvailabilityHandler, GetLessonAvailabilityQuery, GetLessonAvailabilityResult,
    LessonAvailabilityView, StudentLessonAvailabilityQuery,
};
