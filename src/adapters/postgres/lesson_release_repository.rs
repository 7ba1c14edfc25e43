//! PostgreSQL implementation of LessonReleaseRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::map_sqlx_error;
use crate::domain::foundation::{CohortId, DomainError, ErrorCode, LessonId, Timestamp};
use crate::domain::schedule::LessonRelease;
use crate::ports::LessonReleaseRepository;

pub struct PostgresLessonReleaseRepository {
    pool: PgPool,
}

impl PostgresLessonReleaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LessonReleaseRow {
    lesson_id: Uuid,
    cohort_id: Uuid,
    canonical_release_date: Option<DateTime<Utc>>,
    week_number: Option<i32>,
    is_released: bool,
    released_at: Option<DateTime<Utc>>,
}

impl TryFrom<LessonReleaseRow> for LessonRelease {
    type Error = DomainError;

    fn try_from(row: LessonReleaseRow) -> Result<Self, Self::Error> {
        let canonical = row.canonical_release_date.ok_or_else(|| {
            DomainError::malformed_date("canonical_release_date", "release date is NULL")
                .with_detail("lesson_id", row.lesson_id.to_string())
                .with_detail("cohort_id", row.cohort_id.to_string())
        })?;

        Ok(LessonRelease::restore(
            LessonId::from_uuid(row.lesson_id),
            CohortId::from_uuid(row.cohort_id),
            Timestamp::from_datetime(canonical),
            row.week_number.and_then(|w| u32::try_from(w).ok()),
            row.is_released,
            row.released_at.map(Timestamp::from_datetime),
        ))
    }
}

#[async_trait]
impl LessonReleaseRepository for PostgresLessonReleaseRepository {
    async fn find(
        &self,
        lesson_id: &LessonId,
        cohort_id: &CohortId,
    ) -> Result<Option<LessonRelease>, DomainError> {
        let row: Option<LessonReleaseRow> = sqlx::query_as(
            r#"
            SELECT lesson_id, cohort_id, canonical_release_date, week_number,
                   is_released, released_at
            FROM lesson_releases
            WHERE lesson_id = $1 AND cohort_id = $2
            "#,
        )
        .bind(lesson_id.as_uuid())
        .bind(cohort_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find lesson release", e))?;

        row.map(LessonRelease::try_from).transpose()
    }

    async fn save(&self, release: &LessonRelease) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO lesson_releases (
                lesson_id, cohort_id, canonical_release_date, week_number,
                is_released, released_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (lesson_id, cohort_id) DO UPDATE SET
                canonical_release_date = EXCLUDED.canonical_release_date,
                week_number = EXCLUDED.week_number,
                is_released = lesson_releases.is_released OR EXCLUDED.is_released,
                released_at = COALESCE(lesson_releases.released_at, EXCLUDED.released_at)
            "#,
        )
        .bind(release.lesson_id.as_uuid())
        .bind(release.cohort_id.as_uuid())
        .bind(release.canonical_release_date.as_datetime())
        .bind(release.week_number.and_then(|w| i32::try_from(w).ok()))
        .bind(release.is_released())
        .bind(release.released_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to save lesson release", e))?;

        Ok(())
    }

    async fn force_release(
        &self,
        lesson_id: &LessonId,
        cohort_id: &CohortId,
        released_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE lesson_releases
            SET is_released = TRUE,
                released_at = COALESCE(released_at, $3)
            WHERE lesson_id = $1 AND cohort_id = $2
            "#,
        )
        .bind(lesson_id.as_uuid())
        .bind(cohort_id.as_uuid())
        .bind(released_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to force release", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::LessonReleaseNotFound,
                format!("No release record for lesson {} in cohort {}", lesson_id, cohort_id),
            ));
        }
        Ok(())
    }
}
