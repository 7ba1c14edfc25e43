//! Display strings for release times.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use crate::domain::foundation::Timestamp;

/// Shown instead of a countdown once content is open.
pub const AVAILABLE_NOW: &str = "Available now";

/// Shown when content is locked but no release instant could be computed.
pub const RELEASE_TIME_UNAVAILABLE: &str = "Release time unavailable";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Relative countdown such as `"in 5 hours"` or `"in 3 days"`.
///
/// Targets at or before `now` read `"in less than a minute"`.
pub fn time_until(now: Timestamp, target: Timestamp) -> String {
    format!("in {}", distance_in_words(now, target))
}

/// Approximate distance between two instants in words.
///
/// Thresholds: under a minute, whole minutes below 45, "about N hours"
/// below a day, then days, months and years.
pub fn distance_in_words(from: Timestamp, to: Timestamp) -> String {
    let seconds = to.duration_since(&from).num_seconds().abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 1 {
        return "less than a minute".to_string();
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2520 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return format!("about {}", plural(months, "month"));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        return plural(months, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

/// Absolute local time such as `"Monday, January 8th at 8:00 AM"`.
pub fn format_release_time(local: &DateTime<Tz>) -> String {
    let day = local.day();
    format!(
        "{}{}{}",
        local.format("%A, %B "),
        ordinal(day),
        local.format(" at %-I:%M %p")
    )
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
