//! In-memory adapters for tests and local development.
//!
//! Backed by `tokio::sync::RwLock`. Each repository can be switched into an
//! unavailable mode, and the write-side ones count writes.

mod cohort_repository;
mod enrollment_repository;
mod lesson_release_repository;

pub use cohort_repository::InMemoryCohortRepository;
pub use enrollment_repository::InMemoryEnrollmentRepository;
pub use lesson_release_repository::InMemoryLessonReleaseRepository;
