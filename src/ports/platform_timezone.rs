//! Platform timezone port.
//!
//! Supplies whatever timezone identifier the host environment reports.
//! The value is untrusted: `TimezoneResolver::detect` validates it and
//! falls back when it does not resolve.

/// Reports the host's configured timezone identifier.
pub trait PlatformTimezone: Send + Sync {
    /// Returns the raw identifier, or `None` if the platform cannot say.
    fn reported(&self) -> Option<String>;
}
