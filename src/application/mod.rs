//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write (reconciliation, override); query handlers only
//! read, apart from reconcile-on-read of cohort status.

mod components;
pub mod handlers;

pub use components::ReleaseComponents;
pub use handlers::cohort::{
    GetCohortStatusHandler, GetCohortStatusQuery, GetCohortStatusResult, GetCurrentWeekHandler,
    GetCurrentWeekQuery, GetCurrentWeekResult, GetReleaseCountdownHandler, GetReleaseCountdownQuery,
    GetReleaseCountdownResult, ReconcileCohortCommand, ReconcileCohortHandler, ReconcileCohortResult,
    ReconcileCourseCohortsCommand, ReconcileCourseCohortsHandler, ReconcileCourseCohortsResult,
};
pub use handlers::release::{
    ForceReleaseLessonCommand, ForceReleaseLessonHandler, ForceReleaseLessonResult,
    GetLessonAvailabilityHandler, GetLessonAvailabilityQuery, GetLessonAvailabilityResult,
    LessonAvailabilityView, StudentLessonAvailabilityQuery,
};
