//! ForceReleaseLessonHandler - Command handler for the administrator override.
//!
//! The override is one-way. Releasing an already released lesson succeeds
//! without a write and keeps the original `released_at`.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CohortId, LessonId, Timestamp};
use crate::domain::schedule::{LessonRelease, ReleaseQueryError};
use crate::ports::{Clock, LessonReleaseRepository};

/// Command to make a lesson available to every student in a cohort now.
#[derive(Debug, Clone)]
pub struct ForceReleaseLessonCommand {
    pub lesson_id: LessonId,
    pub cohort_id: CohortId,
}

#[derive(Debug, Clone)]
pub struct ForceReleaseLessonResult {
    pub release: LessonRelease,
    /// False when the lesson had already been released.
    pub newly_released: bool,
    pub released_at: Timestamp,
}

pub struct ForceReleaseLessonHandler {
    releases: Arc<dyn LessonReleaseRepository>,
    clock: Arc<dyn Clock>,
}

impl ForceReleaseLessonHandler {
    pub fn new(releases: Arc<dyn LessonReleaseRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { releases, clock }
    }

    pub async fn handle(
        &self,
        cmd: ForceReleaseLessonCommand,
    ) -> Result<ForceReleaseLessonResult, ReleaseQueryError> {
        let mut release = self
            .releases
            .find(&cmd.lesson_id, &cmd.cohort_id)
            .await?
            .ok_or_else(|| ReleaseQueryError::ReleaseNotFound {
                lesson_id: cmd.lesson_id.to_string(),
                cohort_id: cmd.cohort_id.to_string(),
            })?;

        let now = self.clock.now();
        let newly_released = release.force_release(now);
        if newly_released {
            self.releases
                .force_release(&cmd.lesson_id, &cmd.cohort_id, now)
                .await?;
            info!(
                lesson_id = %cmd.lesson_id,
                cohort_id = %cmd.cohort_id,
                "Lesson released by override"
            );
        }

        let released_at = release.released_at().unwrap_or(now);
        Ok(ForceReleaseLessonResult {
            release,
            newly_released,
            released_at,
        })
    }
}
