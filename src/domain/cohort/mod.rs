//! Cohort module - Cohort aggregate, enrollment, and lifecycle.
//!
//! - `Cohort` carries dates, capacity and the weekly release time
//! - `CohortStatus` is the forward-only lifecycle state machine
//! - `CohortLifecycleManager` derives status, current week and countdown

mod aggregate;
mod enrollment;
mod errors;
mod lifecycle;
mod status;

pub use aggregate::Cohort;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use errors::CohortError;
pub use lifecycle::{CohortLifecycleManager, Countdown, Reconciliation};
pub use status::CohortStatus;
