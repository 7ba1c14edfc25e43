//! Wall-clock time of day at which weekly content unlocks.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Hour:minute in the student's local zone, stored as `"HH:MM"`.
///
/// Defaults to 08:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocalReleaseTime(NaiveTime);

impl LocalReleaseTime {
    /// Creates a release time, validating the hour and minute ranges.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("local_hour", 0, 23, hour as i64));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range("local_minute", 0, 59, minute as i64));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::invalid_format("local_time", "unrepresentable time"))
    }

    /// Parses `"HH:MM"` (a single-digit hour such as `"8:00"` is accepted).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| ValidationError::invalid_format("local_time", "expected HH:MM"))?;
        if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "local_time",
                "hour must be one or two digits",
            ));
        }
        if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "local_time",
                "minute must be two digits",
            ));
        }
        let hour: u32 = hour
            .parse()
            .map_err(|_| ValidationError::invalid_format("local_time", "hour is not a number"))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| ValidationError::invalid_format("local_time", "minute is not a number"))?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the time as a `NaiveTime` with zero seconds.
    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for LocalReleaseTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default())
    }
}

impl fmt::Display for LocalReleaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for LocalReleaseTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocalReleaseTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocalReleaseTime> for String {
    fn from(value: LocalReleaseTime) -> Self {
        value.to_string()
    }
}
