//! Schedule module - Per-student lesson release computation.
//!
//! # Overview
//!
//! A lesson release names a canonical calendar day. Every student unlocks
//! it at the same local wall-clock time (08:00 by default) in their own
//! timezone.
//!
//! - `TimezoneResolver` validates, detects and names IANA zones
//! - `ReleaseTimeCalculator` turns a canonical day into a UTC instant
//! - `ReleaseAvailabilityEvaluator` decides visibility for one student
//! - `ScheduleGate` unifies lesson records with the cohort weekly cadence

mod availability;
mod calculator;
mod errors;
mod evaluator;
mod gate;
pub mod humanize;
mod lesson_release;
mod local_time;
mod policy;
mod timezone;

pub use availability::{ReleaseAvailability, ReleaseSource};
pub use calculator::{resolve_local, ReleaseTimeCalculator};
pub use errors::{ReleaseError, ReleaseQueryError};
pub use evaluator::ReleaseAvailabilityEvaluator;
pub use gate::{CohortWeekGate, LessonContext, LessonReleaseGate, ReleaseGate, ScheduleGate};
pub use humanize::{AVAILABLE_NOW, RELEASE_TIME_UNAVAILABLE};
pub use lesson_release::LessonRelease;
pub use local_time::LocalReleaseTime;
pub use policy::{AmbiguousPolicy, CalendarAnchor, DstPolicy, FailurePolicy, NonexistentPolicy};
pub use timezone::{lookup_city, TimezoneResolver, FALLBACK_TIMEZONE};
