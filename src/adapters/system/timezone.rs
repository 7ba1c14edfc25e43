//! Platform timezone adapters.

use tracing::debug;

use crate::ports::PlatformTimezone;

/// Reads the host timezone through `iana-time-zone`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimezone;

impl SystemTimezone {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformTimezone for SystemTimezone {
    fn reported(&self) -> Option<String> {
        match iana_time_zone::get_timezone() {
            Ok(tz) => Some(tz),
            Err(err) => {
                debug!(error = %err, "Host timezone not available");
                None
            }
        }
    }
}

/// Reports a fixed value, or nothing.
#[derive(Debug, Clone, Default)]
pub struct FixedTimezone {
    reported: Option<String>,
}

impl FixedTimezone {
    pub fn new(reported: Option<String>) -> Self {
        Self { reported }
    }

    pub fn reporting(tz: impl Into<String>) -> Self {
        Self::new(Some(tz.into()))
    }
}

impl PlatformTimezone for FixedTimezone {
    fn reported(&self) -> Option<String> {
        self.reported.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timezone_reports_what_it_was_given() {
        assert_eq!(
            FixedTimezone::reporting("Asia/Tokyo").reported().as_deref(),
            Some("Asia/Tokyo")
        );
        assert_eq!(FixedTimezone::new(None).reported(), None);
    }
}
