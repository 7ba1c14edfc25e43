//! Per-student release instant computation.
//!
//! A canonical release instant names a calendar day. Each student unlocks
//! that day at the same local wall-clock time, which means different UTC
//! instants for students in different zones.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use super::errors::ReleaseError;
use super::local_time::LocalReleaseTime;
use super::policy::{AmbiguousPolicy, CalendarAnchor, DstPolicy, NonexistentPolicy};
use super::timezone::TimezoneResolver;
use crate::domain::foundation::Timestamp;

/// Longest span searched when stepping out of a DST gap.
///
/// Covers zones that skipped an entire calendar day.
const MAX_GAP_MINUTES: i64 = 26 * 60;

/// Converts canonical release instants into per-student release instants.
#[derive(Debug, Clone)]
pub struct ReleaseTimeCalculator {
    resolver: TimezoneResolver,
    dst: DstPolicy,
    anchor: CalendarAnchor,
}

impl ReleaseTimeCalculator {
    pub fn new(resolver: TimezoneResolver, dst: DstPolicy, anchor: CalendarAnchor) -> Self {
        Self {
            resolver,
            dst,
            anchor,
        }
    }

    pub fn resolver(&self) -> &TimezoneResolver {
        &self.resolver
    }

    pub fn dst_policy(&self) -> DstPolicy {
        self.dst
    }

    /// Release instant for a student at `local_hour:local_minute`.
    ///
    /// An invalid `student_timezone` is replaced with UTC.
    pub fn compute(
        &self,
        canonical: Timestamp,
        student_timezone: &str,
        local_hour: u32,
        local_minute: u32,
    ) -> Result<Timestamp, ReleaseError> {
        let time = LocalReleaseTime::new(local_hour, local_minute)
            .map_err(|e| ReleaseError::malformed(e.to_string()))?;
        self.compute_at(canonical, student_timezone, time)
    }

    /// Release instant for a student at the given local time of day.
    pub fn compute_at(
        &self,
        canonical: Timestamp,
        student_timezone: &str,
        time: LocalReleaseTime,
    ) -> Result<Timestamp, ReleaseError> {
        let zone = self.resolver.resolve(student_timezone);
        self.compute_in_zone(canonical, zone, time)
    }

    /// Release instant in an already-resolved zone.
    pub fn compute_in_zone(
        &self,
        canonical: Timestamp,
        zone: Tz,
        time: LocalReleaseTime,
    ) -> Result<Timestamp, ReleaseError> {
        ensure_in_range(&canonical)?;

        let date = match self.anchor {
            CalendarAnchor::Canonical => canonical.as_datetime().date_naive(),
            CalendarAnchor::StudentLocal => canonical.as_datetime().with_timezone(&zone).date_naive(),
        };
        let local = date.and_time(time.as_naive_time());
        let resolved = resolve_local(&zone, local, self.dst)?;

        debug!(
            canonical = %canonical.as_datetime(),
            zone = zone.name(),
            local = %local,
            resolved = %resolved,
            "Computed student release instant"
        );
        Ok(Timestamp::from_datetime(resolved))
    }
}

/// Places a local wall-clock time in `zone`, applying the DST policy.
///
/// - A unique local time maps directly.
/// - A repeated local time (fall-back) picks per `policy.ambiguous`.
/// - A skipped local time (spring-forward) moves per `policy.nonexistent`.
pub fn resolve_local(
    zone: &Tz,
    local: NaiveDateTime,
    policy: DstPolicy,
) -> Result<DateTime<Utc>, ReleaseError> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(a, b) => {
            let (earliest, latest) = if a <= b { (a, b) } else { (b, a) };
            let chosen = match policy.ambiguous {
                AmbiguousPolicy::Earliest => earliest,
                AmbiguousPolicy::Latest => latest,
            };
            Ok(chosen.with_timezone(&Utc))
        }
        LocalResult::None => match policy.nonexistent {
            NonexistentPolicy::SnapForward => snap_forward(zone, local),
            NonexistentPolicy::ShiftForward => shift_forward(zone, local),
        },
    }
}

fn snap_forward(zone: &Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, ReleaseError> {
    for step in 1..=MAX_GAP_MINUTES {
        let candidate = local + Duration::minutes(step);
        match zone.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(a, b) => return Ok(a.min(b).with_timezone(&Utc)),
            LocalResult::None => continue,
        }
    }
    Err(unresolvable(zone, local))
}

fn shift_forward(zone: &Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, ReleaseError> {
    for step in 1..=MAX_GAP_MINUTES {
        let candidate = local - Duration::minutes(step);
        let before_gap = match zone.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(a, b) => a.max(b),
            LocalResult::None => continue,
        };
        let offset = i64::from(before_gap.offset().fix().local_minus_utc());
        return Ok(Utc.from_utc_datetime(&(local - Duration::seconds(offset))));
    }
    Err(unresolvable(zone, local))
}

fn unresolvable(zone: &Tz, local: NaiveDateTime) -> ReleaseError {
    ReleaseError::UnresolvableLocalTime {
        local,
        zone: zone.name().to_string(),
    }
}

/// Rejects instants so close to the representable edge that calendar
/// arithmetic around them would overflow.
fn ensure_in_range(canonical: &Timestamp) -> Result<(), ReleaseError> {
    let dt = canonical.as_datetime();
    let margin = Duration::days(3);
    if dt.checked_add_signed(margin).is_none() || dt.checked_sub_signed(margin).is_none() {
        return Err(ReleaseError::malformed(format!(
            "{} is outside the supported calendar range",
            dt
        )));
    }
    Ok(())
}
