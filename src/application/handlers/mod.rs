//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod cohort;
pub mod release;
