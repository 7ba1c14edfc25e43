//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `system` - Host clock and platform timezone
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx-backed repositories

pub mod memory;
pub mod postgres;
pub mod system;

pub use memory::{InMemoryCohortRepository, InMemoryEnrollmentRepository, InMemoryLessonReleaseRepository};
pub use system::{FixedClock, FixedTimezone, SystemClock, SystemTimezone};
