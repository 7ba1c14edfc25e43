//! Timezone identifier validation, detection, and display names.
//!
//! The zone database is the `chrono-tz` snapshot compiled into the binary,
//! so validation results do not depend on the host's tzdata.
//!
//! Nothing in here returns an error. Unknown identifiers are downgraded to
//! UTC with a warning so a bad profile value can never lock a student out.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Offset, Utc};
use chrono_tz::{OffsetComponents, Tz};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::ports::{Clock, PlatformTimezone};

/// Identifier used whenever nothing better can be resolved.
pub const FALLBACK_TIMEZONE: &str = "UTC";

/// City names (lowercase, spaces for underscores) mapped to IANA zones.
///
/// Covers platforms that report a bare city or a retired alias that is not
/// in the compiled database.
static CITY_ZONES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("new york", "America/New_York"),
        ("boston", "America/New_York"),
        ("washington", "America/New_York"),
        ("toronto", "America/Toronto"),
        ("chicago", "America/Chicago"),
        ("houston", "America/Chicago"),
        ("dallas", "America/Chicago"),
        ("denver", "America/Denver"),
        ("phoenix", "America/Phoenix"),
        ("los angeles", "America/Los_Angeles"),
        ("san francisco", "America/Los_Angeles"),
        ("seattle", "America/Los_Angeles"),
        ("vancouver", "America/Vancouver"),
        ("anchorage", "America/Anchorage"),
        ("honolulu", "Pacific/Honolulu"),
        ("mexico city", "America/Mexico_City"),
        ("sao paulo", "America/Sao_Paulo"),
        ("buenos aires", "America/Argentina/Buenos_Aires"),
        ("london", "Europe/London"),
        ("dublin", "Europe/Dublin"),
        ("lisbon", "Europe/Lisbon"),
        ("paris", "Europe/Paris"),
        ("berlin", "Europe/Berlin"),
        ("madrid", "Europe/Madrid"),
        ("rome", "Europe/Rome"),
        ("amsterdam", "Europe/Amsterdam"),
        ("stockholm", "Europe/Stockholm"),
        ("athens", "Europe/Athens"),
        ("istanbul", "Europe/Istanbul"),
        ("moscow", "Europe/Moscow"),
        ("cairo", "Africa/Cairo"),
        ("lagos", "Africa/Lagos"),
        ("nairobi", "Africa/Nairobi"),
        ("johannesburg", "Africa/Johannesburg"),
        ("dubai", "Asia/Dubai"),
        ("karachi", "Asia/Karachi"),
        ("mumbai", "Asia/Kolkata"),
        ("bombay", "Asia/Kolkata"),
        ("delhi", "Asia/Kolkata"),
        ("new delhi", "Asia/Kolkata"),
        ("calcutta", "Asia/Kolkata"),
        ("kolkata", "Asia/Kolkata"),
        ("dhaka", "Asia/Dhaka"),
        ("bangkok", "Asia/Bangkok"),
        ("jakarta", "Asia/Jakarta"),
        ("singapore", "Asia/Singapore"),
        ("hong kong", "Asia/Hong_Kong"),
        ("shanghai", "Asia/Shanghai"),
        ("beijing", "Asia/Shanghai"),
        ("manila", "Asia/Manila"),
        ("seoul", "Asia/Seoul"),
        ("tokyo", "Asia/Tokyo"),
        ("sydney", "Australia/Sydney"),
        ("melbourne", "Australia/Melbourne"),
        ("brisbane", "Australia/Brisbane"),
        ("perth", "Australia/Perth"),
        ("auckland", "Pacific/Auckland"),
    ])
});

/// Long names as (standard, daylight) pairs, keyed by zone identifier.
static LONG_NAMES: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    let eastern = ("Eastern Standard Time", "Eastern Daylight Time");
    let central = ("Central Standard Time", "Central Daylight Time");
    let mountain = ("Mountain Standard Time", "Mountain Daylight Time");
    let pacific = ("Pacific Standard Time", "Pacific Daylight Time");
    let central_eu = ("Central European Standard Time", "Central European Summer Time");
    let eastern_eu = ("Eastern European Standard Time", "Eastern European Summer Time");
    let aus_eastern = (
        "Australian Eastern Standard Time",
        "Australian Eastern Daylight Time",
    );
    HashMap::from([
        ("UTC", ("Coordinated Universal Time", "Coordinated Universal Time")),
        ("Etc/UTC", ("Coordinated Universal Time", "Coordinated Universal Time")),
        ("America/New_York", eastern),
        ("America/Toronto", eastern),
        ("America/Detroit", eastern),
        ("America/Chicago", central),
        ("America/Mexico_City", central),
        ("America/Denver", mountain),
        ("America/Phoenix", mountain),
        ("America/Los_Angeles", pacific),
        ("America/Vancouver", pacific),
        ("America/Anchorage", ("Alaska Standard Time", "Alaska Daylight Time")),
        (
            "Pacific/Honolulu",
            ("Hawaii-Aleutian Standard Time", "Hawaii-Aleutian Daylight Time"),
        ),
        ("America/Sao_Paulo", ("Brasilia Standard Time", "Brasilia Summer Time")),
        ("Europe/London", ("Greenwich Mean Time", "British Summer Time")),
        ("Europe/Dublin", ("Greenwich Mean Time", "Irish Standard Time")),
        ("Europe/Lisbon", ("Western European Standard Time", "Western European Summer Time")),
        ("Europe/Paris", central_eu),
        ("Europe/Berlin", central_eu),
        ("Europe/Madrid", central_eu),
        ("Europe/Rome", central_eu),
        ("Europe/Amsterdam", central_eu),
        ("Europe/Stockholm", central_eu),
        ("Europe/Athens", eastern_eu),
        ("Africa/Cairo", eastern_eu),
        ("Europe/Moscow", ("Moscow Standard Time", "Moscow Summer Time")),
        ("Africa/Lagos", ("West Africa Standard Time", "West Africa Summer Time")),
        ("Africa/Nairobi", ("East Africa Time", "East Africa Time")),
        (
            "Africa/Johannesburg",
            ("South Africa Standard Time", "South Africa Standard Time"),
        ),
        ("Asia/Dubai", ("Gulf Standard Time", "Gulf Standard Time")),
        ("Asia/Kolkata", ("India Standard Time", "India Standard Time")),
        ("Asia/Singapore", ("Singapore Standard Time", "Singapore Standard Time")),
        ("Asia/Shanghai", ("China Standard Time", "China Daylight Time")),
        ("Asia/Hong_Kong", ("Hong Kong Standard Time", "Hong Kong Summer Time")),
        ("Asia/Tokyo", ("Japan Standard Time", "Japan Daylight Time")),
        ("Asia/Seoul", ("Korean Standard Time", "Korean Daylight Time")),
        ("Australia/Sydney", aus_eastern),
        ("Australia/Melbourne", aus_eastern),
        ("Australia/Brisbane", aus_eastern),
        (
            "Pacific/Auckland",
            ("New Zealand Standard Time", "New Zealand Daylight Time"),
        ),
    ])
});

/// Validates and normalizes timezone identifiers.
///
/// Holds the platform probe and clock as injected dependencies; all other
/// state is the static zone database.
#[derive(Clone)]
pub struct TimezoneResolver {
    platform: Arc<dyn PlatformTimezone>,
    clock: Arc<dyn Clock>,
}

impl TimezoneResolver {
    pub fn new(platform: Arc<dyn PlatformTimezone>, clock: Arc<dyn Clock>) -> Self {
        Self { platform, clock }
    }

    /// True iff `tz` names a zone in the database.
    pub fn validate(&self, tz: &str) -> bool {
        parse_zone(tz).is_some()
    }

    /// Parses `tz`, substituting UTC (and logging) when it does not resolve.
    pub fn resolve(&self, tz: &str) -> Tz {
        match parse_zone(tz) {
            Some(zone) => zone,
            None => {
                warn!(timezone = %tz, fallback = FALLBACK_TIMEZONE, "Invalid timezone, using fallback");
                Tz::UTC
            }
        }
    }

    /// Best-effort identifier for the host environment.
    ///
    /// Order: the platform-reported identifier, then the curated city table
    /// applied to that report, then `"UTC"`.
    pub fn detect(&self) -> String {
        let reported = match self.platform.reported() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                debug!("Platform did not report a timezone");
                return FALLBACK_TIMEZONE.to_string();
            }
        };

        if let Some(zone) = parse_zone(&reported) {
            return zone.name().to_string();
        }

        if let Some(zone) = lookup_city(&reported) {
            debug!(reported = %reported, resolved = zone, "Mapped platform timezone via city table");
            return zone.to_string();
        }

        warn!(reported = %reported, "Unrecognized platform timezone, using fallback");
        FALLBACK_TIMEZONE.to_string()
    }

    /// Long human-readable name for `tz` at the current instant.
    ///
    /// Returns `tz` unchanged when it does not resolve.
    pub fn display_name(&self, tz: &str) -> String {
        self.display_name_at(tz, *self.clock.now().as_datetime())
    }

    /// Long human-readable name for `tz` at `at`, so DST is reflected.
    ///
    /// Zones without a curated long name render as `GMT+hh:mm`.
    pub fn display_name_at(&self, tz: &str, at: DateTime<Utc>) -> String {
        let Some(zone) = parse_zone(tz) else {
            return tz.to_string();
        };

        let local = at.with_timezone(&zone);
        let offset = local.offset();
        let in_dst = offset.dst_offset() != chrono::Duration::zero();

        if let Some((standard, daylight)) = LONG_NAMES.get(zone.name()) {
            return if in_dst { daylight } else { standard }.to_string();
        }

        format_gmt_offset(offset.fix().local_minus_utc())
    }
}

impl std::fmt::Debug for TimezoneResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimezoneResolver")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

/// Looks up a city name or zone-like string in the curated table.
///
/// `"America/New_York"`, `"New York"` and `"new_york"` all match.
pub fn lookup_city(name: &str) -> Option<&'static str> {
    let city = name.rsplit('/').next().unwrap_or(name);
    let key = city.trim().replace('_', " ").to_lowercase();
    CITY_ZONES.get(key.as_str()).copied()
}

fn parse_zone(tz: &str) -> Option<Tz> {
    let trimmed = tz.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Tz>().ok()
}

fn format_gmt_offset(offset_secs: i32) -> String {
    if offset_secs == 0 {
        return "GMT".to_string();
    }
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.abs();
    format!("GMT{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::system::{FixedClock, FixedTimezone};
    use crate::domain::foundation::Timestamp;

    fn resolver_with(reported: Option<&str>) -> TimezoneResolver {
        let clock = FixedClock::at(Timestamp::parse_rfc3339("2024-01-15T12:00:00Z").unwrap());
        TimezoneResolver::new(
            Arc::new(FixedTimezone::new(reported.map(str::to_string))),
            Arc::new(clock),
        )
    }

    fn utc(s: &str) -> DateTime<Utc> {
        *Timestamp::parse_rfc3339(s).unwrap().as_datetime()
    }

    #[test]
    fn validate_accepts_database_zones() {
        let resolver = resolver_with(None);
        assert!(resolver.validate("America/New_York"));
        assert!(resolver.validate("UTC"));
        assert!(resolver.validate("Asia/Kolkata"));
    }

    #[test]
    fn validate_rejects_unknown_zones() {
        let resolver = resolver_with(None);
        assert!(!resolver.validate("Mars/Colony"));
        assert!(!resolver.validate(""));
        assert!(!resolver.validate("New York"));
    }

    #[test]
    fn resolve_falls_back_to_utc() {
        let resolver = resolver_with(None);
        assert_eq!(resolver.resolve("Mars/Colony"), Tz::UTC);
        assert_eq!(resolver.resolve("Europe/Paris"), Tz::Europe__Paris);
    }

    #[test]
    fn detect_uses_valid_platform_zone() {
        assert_eq!(resolver_with(Some("Europe/Berlin")).detect(), "Europe/Berlin");
    }

    #[test]
    fn detect_maps_bare_city_names() {
        assert_eq!(resolver_with(Some("New York")).detect(), "America/New_York");
        assert_eq!(resolver_with(Some("Somewhere/Bombay")).detect(), "Asia/Kolkata");
    }

    #[test]
    fn detect_falls_back_to_utc() {
        assert_eq!(resolver_with(Some("Mars/Colony")).detect(), "UTC");
        assert_eq!(resolver_with(Some("  ")).detect(), "UTC");
        assert_eq!(resolver_with(None).detect(), "UTC");
    }

    #[test]
    fn display_name_tracks_daylight_saving() {
        let resolver = resolver_with(None);
        assert_eq!(
            resolver.display_name_at("America/New_York", utc("2024-01-15T12:00:00Z")),
            "Eastern Standard Time"
        );
        assert_eq!(
            resolver.display_name_at("America/New_York", utc("2024-07-15T12:00:00Z")),
            "Eastern Daylight Time"
        );
        assert_eq!(
            resolver.display_name_at("Europe/London", utc("2024-07-15T12:00:00Z")),
            "British Summer Time"
        );
    }

    #[test]
    fn display_name_uses_clock_for_current_instant() {
        assert_eq!(
            resolver_with(None).display_name("America/Los_Angeles"),
            "Pacific Standard Time"
        );
    }

    #[test]
    fn display_name_formats_uncurated_zones_as_offset() {
        let resolver = resolver_with(None);
        assert_eq!(
            resolver.display_name_at("Asia/Kathmandu", utc("2024-01-15T12:00:00Z")),
            "GMT+05:45"
        );
        assert_eq!(
            resolver.display_name_at("America/St_Johns", utc("2024-01-15T12:00:00Z")),
            "GMT-03:30"
        );
    }

    #[test]
    fn display_name_returns_input_when_unresolvable() {
        assert_eq!(resolver_with(None).display_name("Mars/Colony"), "Mars/Colony");
    }

    #[test]
    fn lookup_city_normalizes_input() {
        assert_eq!(lookup_city("los_angeles"), Some("America/Los_Angeles"));
        assert_eq!(lookup_city("  TOKYO "), Some("Asia/Tokyo"));
        assert_eq!(lookup_city("Atlantis"), None);
    }
}
