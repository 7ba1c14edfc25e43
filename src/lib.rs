//! Cohort Release - Timezone-aware weekly lesson release gating
//!
//! Students in a cohort move through a course on a shared weekly calendar.
//! Each lesson unlocks at the same local wall-clock time for every student,
//! in that student's own timezone.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
