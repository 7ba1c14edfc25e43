//! Domain layer containing release gating logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `schedule` - Timezone resolution and per-student release computation
//! - `cohort` - Cohort aggregate, enrollment, and lifecycle management

pub mod cohort;
pub mod foundation;
pub mod schedule;
