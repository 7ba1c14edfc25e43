//! Named policies for the two places release computation has to make a call:
//! daylight-saving edge cases and computation failures.

use serde::{Deserialize, Serialize};

/// How to place a local time that falls inside a spring-forward gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonexistentPolicy {
    /// Use the first valid local minute after the gap (the transition instant).
    ///
    /// 02:30 on a US spring-forward day becomes 03:00 local.
    #[default]
    SnapForward,

    /// Apply the offset in force before the gap, preserving the wall-clock
    /// distance from midnight.
    ///
    /// 02:30 on a US spring-forward day becomes 03:30 local.
    ShiftForward,
}

/// How to pick between the two instants of a repeated fall-back local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousPolicy {
    /// First occurrence (still on daylight time).
    #[default]
    Earliest,

    /// Second occurrence (already on standard time).
    Latest,
}

/// Combined daylight-saving disambiguation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DstPolicy {
    #[serde(default)]
    pub nonexistent: NonexistentPolicy,
    #[serde(default)]
    pub ambiguous: AmbiguousPolicy,
}

impl DstPolicy {
    pub fn new(nonexistent: NonexistentPolicy, ambiguous: AmbiguousPolicy) -> Self {
        Self {
            nonexistent,
            ambiguous,
        }
    }
}

/// Which calendar date of the canonical instant a student's release lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarAnchor {
    /// The canonical instant's UTC date. Every student unlocks on the same
    /// calendar day regardless of how far west of UTC they are.
    #[default]
    Canonical,

    /// The canonical instant's date as seen from the student's zone. A
    /// midnight-UTC release lands on the previous day west of UTC.
    StudentLocal,
}

/// What availability checks report when the release instant cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Treat the lesson as available. Favors access over false lockout.
    #[default]
    Open,

    /// Treat the lesson as locked.
    Closed,
}

impl FailurePolicy {
    /// Availability to report when computation failed.
    pub fn grants_access(&self) -> bool {
        matches!(self, FailurePolicy::Open)
    }
}
