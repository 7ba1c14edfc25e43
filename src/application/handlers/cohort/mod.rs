//! Cohort handlers.
//!
//! ## Commands
//! - Reconciling one cohort's stored status
//! - Reconciling every cohort of a course (list load path)
//!
//! ## Queries
//! - Cohort status (reconciled on read)
//! - Current week index
//! - Countdown to the next weekly release

mod get_cohort_status;
mod get_current_week;
mod get_release_countdown;
mod reconcile_cohort;
mod reconcile_course_cohorts;

// Commands
pub use reconcile_cohort::{ReconcileCohortCommand, ReconcileCohortHandler, ReconcileCohortResult};
pub use reconcile_course_cohorts::{
    ReconcileCourseCohortsCommand, ReconcileCourseCohortsHandler, ReconcileCourseCohortsResult,
};

// Queries
pub use get_cohort_status::{GetCohortStatusHandler, GetCohortStatusQuery, GetCohortStatusResult};
pub use get_current_week::{GetCurrentWeekHandler, GetCurrentWeekQuery, GetCurrentWeekResult};
pub use get_release_countdown::{
    GetReleaseCountdownHandler, GetReleaseCountdownQuery, GetReleaseCountdownResult,
};
