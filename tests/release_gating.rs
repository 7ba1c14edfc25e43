//! Integration tests for per-student lesson release gating.
//!
//! Exercises the full query path:
//! 1. Components are assembled from `ReleaseConfig`
//! 2. Release records and enrollments live in in-memory repositories
//! 3. Handlers read through the ports and decide with the schedule gate
//!
//! Time is pinned with `FixedClock` so every boundary is exact.

use std::sync::Arc;

use cohort_release::adapters::{
    FixedClock, FixedTimezone, InMemoryCohortRepository, InMemoryEnrollmentRepository,
    InMemoryLessonReleaseRepository,
};
use cohort_release::application::{
    ForceReleaseLessonCommand, ForceReleaseLessonHandler, GetLessonAvailabilityHandler,
    GetLessonAvailabilityQuery, ReleaseComponents, StudentLessonAvailabilityQuery,
};
use cohort_release::config::ReleaseConfig;
use cohort_release::domain::cohort::{Cohort, Enrollment};
use cohort_release::domain::foundation::{CohortId, CourseId, LessonId, StudentId, Timestamp};
use cohort_release::domain::schedule::{FailurePolicy, LessonRelease, ReleaseSource, AVAILABLE_NOW};
use cohort_release::ports::LessonReleaseRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn ts(s: &str) -> Timestamp {
    Timestamp::parse_rfc3339(s).unwrap()
}

struct Harness {
    clock: Arc<FixedClock>,
    releases: Arc<InMemoryLessonReleaseRepository>,
    cohorts: Arc<InMemoryCohortRepository>,
    enrollments: Arc<InMemoryEnrollmentRepository>,
    availability: GetLessonAvailabilityHandler,
    force_release: ForceReleaseLessonHandler,
}

impl Harness {
    fn new(config: ReleaseConfig, now: &str) -> Self {
        let clock = Arc::new(FixedClock::at(ts(now)));
        let components =
            ReleaseComponents::from_config(&config, clock.clone(), Arc::new(FixedTimezone::new(None)))
                .unwrap();

        let releases = Arc::new(InMemoryLessonReleaseRepository::new());
        let cohorts = Arc::new(InMemoryCohortRepository::new());
        let enrollments = Arc::new(InMemoryEnrollmentRepository::new());

        let availability = GetLessonAvailabilityHandler::new(
            releases.clone(),
            cohorts.clone(),
            enrollments.clone(),
            components.gate.clone(),
            components.clock.clone(),
            components.failure_policy,
        );
        let force_release = ForceReleaseLessonHandler::new(releases.clone(), components.clock.clone());

        Self {
            clock,
            releases,
            cohorts,
            enrollments,
            availability,
            force_release,
        }
    }

    async fn schedule(&self, canonical: &str) -> LessonRelease {
        let release = LessonRelease::scheduled(LessonId::new(), CohortId::new(), ts(canonical));
        self.releases.save(&release).await.unwrap();
        release
    }

    async fn available(&self, release: &LessonRelease, tz: &str) -> bool {
        self.availability
            .is_available(GetLessonAvailabilityQuery::new(release.lesson_id, release.cohort_id, tz))
            .await
            .unwrap()
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn new_york_student_unlocks_at_eight_local() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-08T12:59:59Z");
    let release = h.schedule("2024-01-08T00:00:00Z").await;

    assert!(!h.available(&release, "America/New_York").await);

    h.clock.set(ts("2024-01-08T13:00:01Z"));
    assert!(h.available(&release, "America/New_York").await);
}

#[tokio::test]
async fn override_opens_far_future_lesson() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-08T00:00:00Z");
    let release = h.schedule("2099-01-01T00:00:00Z").await;
    assert!(!h.available(&release, "Asia/Tokyo").await);

    let result = h
        .force_release
        .handle(ForceReleaseLessonCommand {
            lesson_id: release.lesson_id,
            cohort_id: release.cohort_id,
        })
        .await
        .unwrap();
    assert!(result.newly_released);

    let view = h
        .availability
        .handle(GetLessonAvailabilityQuery::new(release.lesson_id, release.cohort_id, "Asia/Tokyo"))
        .await
        .unwrap();
    assert!(view.availability.available);
    assert_eq!(view.availability.source, ReleaseSource::ManualOverride);
    assert_eq!(view.availability.time_until_release, AVAILABLE_NOW);
}

#[tokio::test]
async fn invalid_timezone_is_gated_as_utc() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-08T07:59:59Z");
    let release = h.schedule("2024-01-08T00:00:00Z").await;

    assert!(!h.available(&release, "Mars/Colony").await);
    h.clock.set(ts("2024-01-08T08:00:00Z"));
    assert!(h.available(&release, "Mars/Colony").await);
}

#[tokio::test]
async fn lesson_without_record_is_available() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-08T00:00:00Z");
    let query = GetLessonAvailabilityQuery::new(LessonId::new(), CohortId::new(), "Europe/London");

    assert!(h.availability.is_available(query.clone()).await.unwrap());
    assert_eq!(h.availability.formatted_release_time(query).await.unwrap(), AVAILABLE_NOW);
}

// =============================================================================
// Per-student behavior
// =============================================================================

#[tokio::test]
async fn students_in_different_zones_unlock_at_different_instants() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-08T10:00:00Z");
    let release = h.schedule("2024-01-08T00:00:00Z").await;

    // 08:00 local: Tokyo 23:00Z on the 7th, London 08:00Z, New York 13:00Z.
    assert!(h.available(&release, "Asia/Tokyo").await);
    assert!(h.available(&release, "Europe/London").await);
    assert!(!h.available(&release, "America/New_York").await);
}

#[tokio::test]
async fn enrollment_timezone_drives_student_queries() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-08T12:00:00Z");
    let release = h.schedule("2024-01-08T00:00:00Z").await;
    let berlin = StudentId::new("berlin-student").unwrap();
    let denver = StudentId::new("denver-student").unwrap();
    h.enrollments
        .insert(Enrollment::new(berlin.clone(), release.cohort_id, Some("Europe/Berlin".into())))
        .await;
    h.enrollments
        .insert(Enrollment::new(denver.clone(), release.cohort_id, Some("America/Denver".into())))
        .await;

    let query = |student: StudentId| StudentLessonAvailabilityQuery {
        student_id: student,
        lesson_id: release.lesson_id,
        cohort_id: release.cohort_id,
        lesson_week: None,
    };

    let berlin_view = h.availability.handle_for_student(query(berlin)).await.unwrap();
    assert!(berlin_view.availability.available);

    let denver_view = h.availability.handle_for_student(query(denver)).await.unwrap();
    assert!(!denver_view.availability.available);
    assert_eq!(denver_view.availability.time_until_release, "in about 3 hours");
    assert_eq!(
        denver_view.availability.formatted_release_time,
        "Monday, January 8th at 8:00 AM"
    );
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn corrupt_release_row_fails_open_by_default() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-01T00:00:00Z");
    let release = h.schedule("2099-01-01T00:00:00Z").await;
    h.releases.mark_corrupt(release.lesson_id, release.cohort_id).await;

    let view = h
        .availability
        .handle(GetLessonAvailabilityQuery::new(release.lesson_id, release.cohort_id, "UTC"))
        .await
        .unwrap();
    assert!(view.availability.available);
    assert_eq!(view.availability.source, ReleaseSource::FailurePolicy);
}

#[tokio::test]
async fn corrupt_release_row_can_fail_closed() {
    let config = ReleaseConfig {
        failure_policy: FailurePolicy::Closed,
        ..Default::default()
    };
    let h = Harness::new(config, "2024-01-01T00:00:00Z");
    let release = h.schedule("2023-01-01T00:00:00Z").await;
    h.releases.mark_corrupt(release.lesson_id, release.cohort_id).await;

    assert!(!h.available(&release, "UTC").await);
}

#[tokio::test]
async fn unavailable_store_is_an_error_not_a_decision() {
    let h = Harness::new(ReleaseConfig::default(), "2024-01-01T00:00:00Z");
    let release = h.schedule("2024-01-08T00:00:00Z").await;
    h.releases.set_unavailable(true);

    let err = h
        .availability
        .handle(GetLessonAvailabilityQuery::new(release.lesson_id, release.cohort_id, "UTC"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn cohort_week_fallback_survives_out_of_range_week() {
    let config = ReleaseConfig {
        cohort_week_fallback: true,
        ..Default::default()
    };
    let h = Harness::new(config, "2024-01-03T00:00:00Z");
    let start = ts("2024-01-01T00:00:00Z");
    let cohort = Cohort::new(CohortId::new(), CourseId::new(), "Winter", start, start.add_weeks(8), 30, start)
        .unwrap();
    h.cohorts.insert(cohort.clone()).await;

    let view = h
        .availability
        .handle(GetLessonAvailabilityQuery::new(LessonId::new(), cohort.id, "UTC").in_week(u32::MAX))
        .await
        .unwrap();
    assert!(view.availability.available);
    assert_eq!(view.availability.source, ReleaseSource::FailurePolicy);

    let week_two = h
        .availability
        .handle(GetLessonAvailabilityQuery::new(LessonId::new(), cohort.id, "UTC").in_week(2))
        .await
        .unwrap();
    assert!(!week_two.availability.available);
    assert_eq!(week_two.availability.source, ReleaseSource::CohortWeek);
}
