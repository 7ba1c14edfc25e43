//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Environment Ports
//!
//! - `Clock` - Current instant
//! - `PlatformTimezone` - Host-reported timezone identifier
//!
//! ## Repository Ports
//!
//! - `CohortRepository` - Cohort reads and status writes
//! - `LessonReleaseRepository` - Per-lesson release records (the release schedule store)
//! - `EnrollmentRepository` - Student enrollment and profile timezone

mod clock;
mod cohort_repository;
mod enrollment_repository;
mod lesson_release_repository;
mod platform_timezone;

pub use clock::Clock;
pub use cohort_repository::CohortRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use lesson_release_repository::LessonReleaseRepository;
pub use platform_timezone::PlatformTimezone;
