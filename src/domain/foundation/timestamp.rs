//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// Domain code should read time through the `Clock` port instead.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string such as `2024-01-08T00:00:00Z`.
    pub fn parse_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)))
    }

    /// Creates a timestamp from Unix seconds, or `None` when out of range.
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by adding whole weeks.
    pub fn add_weeks(&self, weeks: i64) -> Self {
        Self(self.0 + Duration::weeks(weeks))
    }

    /// Adds whole weeks, returning `None` when the result leaves chrono's range.
    pub fn checked_add_weeks(&self, weeks: i64) -> Option<Self> {
        let delta = Duration::try_weeks(weeks)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn parse_rfc3339_normalizes_to_utc() {
        let t = ts("2024-01-08T08:00:00-05:00");
        assert_eq!(t.as_datetime().hour(), 13);
        assert_eq!(t.as_datetime().day(), 8);
    }

    #[test]
    fn parse_rfc3339_rejects_garbage() {
        assert!(Timestamp::parse_rfc3339("next tuesday").is_err());
    }

    #[test]
    fn ordering_helpers_agree() {
        let earlier = ts("2024-01-01T00:00:00Z");
        let later = ts("2024-01-02T00:00:00Z");

        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(earlier < later);
    }

    #[test]
    fn duration_since_is_signed() {
        let a = ts("2024-01-01T00:00:00Z");
        let b = ts("2024-01-01T01:00:00Z");
        assert_eq!(b.duration_since(&a), Duration::hours(1));
        assert_eq!(a.duration_since(&b), Duration::hours(-1));
    }

    #[test]
    fn add_weeks_adds_seven_day_blocks() {
        let start = ts("2024-01-01T00:00:00Z");
        assert_eq!(start.add_weeks(2), ts("2024-01-15T00:00:00Z"));
        assert_eq!(start.add_days(-1), ts("2023-12-31T00:00:00Z"));
    }

    #[test]
    fn checked_add_weeks_reports_overflow() {
        let start = ts("2024-01-01T00:00:00Z");
        assert_eq!(start.checked_add_weeks(2), Some(ts("2024-01-15T00:00:00Z")));
        assert_eq!(start.checked_add_weeks(i64::from(u32::MAX)), None);
        assert_eq!(start.checked_add_weeks(i64::MAX), None);
    }

    #[test]
    fn unix_secs_roundtrip() {
        // 2024-01-15T00:00:00Z
        let t = Timestamp::from_unix_secs(1705276800).unwrap();
        assert_eq!(t.as_datetime().year(), 2024);
        assert_eq!(t.as_unix_secs(), 1705276800);
        assert_eq!(t.plus_secs(60).as_unix_secs(), 1705276860);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let json = serde_json::to_string(&ts("2024-01-15T10:30:00Z")).unwrap();
        assert!(json.contains("2024-01-15T10:30:00"));
    }
}
