//! Host environment adapters - clock and platform timezone.
//!
//! - `SystemClock` / `SystemTimezone` - Production implementations
//! - `FixedClock` / `FixedTimezone` - Deterministic implementations for tests

mod clock;
mod timezone;

pub use clock::{FixedClock, SystemClock};
pub use timezone::{FixedTimezone, SystemTimezone};
