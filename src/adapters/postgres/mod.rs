//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCohortRepository` - Cohort reads and targeted status writes
//! - `PostgresLessonReleaseRepository` - Lesson release records
//! - `PostgresEnrollmentRepository` - Enrollment timezone lookups
//!
//! Undecodable rows surface as `ErrorCode::MalformedDate`; connection
//! failures as `ErrorCode::StoreUnavailable`.

mod cohort_repository;
mod enrollment_repository;
mod errors;
mod lesson_release_repository;
mod pool;

pub use cohort_repository::PostgresCohortRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use lesson_release_repository::PostgresLessonReleaseRepository;
pub use pool::{connect, run_migrations};
