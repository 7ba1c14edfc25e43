//! Clock port.
//!
//! Every "now" reading in the release and cohort logic goes through this
//! trait so tests can pin time to an exact instant.

use std::fmt;

use crate::domain::foundation::Timestamp;

/// Source of wall-clock time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}
