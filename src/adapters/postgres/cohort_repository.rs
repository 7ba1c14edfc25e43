//! PostgreSQL implementation of CohortRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::map_sqlx_error;
use crate::domain::cohort::{Cohort, CohortStatus};
use crate::domain::foundation::{CohortId, CourseId, DomainError, ErrorCode, Timestamp};
use crate::domain::schedule::LocalReleaseTime;
use crate::ports::CohortRepository;

const SELECT_COHORT: &str = r#"
    SELECT id, course_id, name, start_date, end_date, enrollment_deadline,
           max_students, current_students, status, weekly_release_local_time,
           is_active, created_at, updated_at
    FROM cohorts
"#;

pub struct PostgresCohortRepository {
    pool: PgPool,
}

impl PostgresCohortRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cohort.
///
/// Date columns are nullable in older schemas, so they decode as `Option`
/// and are checked in `TryFrom`.
#[derive(Debug, sqlx::FromRow)]
struct CohortRow {
    id: Uuid,
    course_id: Uuid,
    name: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    enrollment_deadline: Option<DateTime<Utc>>,
    max_students: i32,
    current_students: i32,
    status: String,
    weekly_release_local_time: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CohortRow> for Cohort {
    type Error = DomainError;

    fn try_from(row: CohortRow) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            DomainError::malformed_date(field, format!("{} is NULL", field))
                .with_detail("cohort_id", row.id.to_string())
        };
        let start_date = row.start_date.ok_or_else(|| missing("start_date"))?;
        let end_date = row.end_date.ok_or_else(|| missing("end_date"))?;

        let status: CohortStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Invalid status value: {}", e))
        })?;
        let weekly_release_local_time = LocalReleaseTime::parse(&row.weekly_release_local_time)
            .map_err(|e| DomainError::malformed_date("weekly_release_local_time", e.to_string()))?;

        let cohort = Cohort {
            id: CohortId::from_uuid(row.id),
            course_id: CourseId::from_uuid(row.course_id),
            name: row.name,
            start_date: Timestamp::from_datetime(start_date),
            end_date: Timestamp::from_datetime(end_date),
            enrollment_deadline: row.enrollment_deadline.map(Timestamp::from_datetime),
            max_students: to_count(row.max_students),
            current_students: to_count(row.current_students),
            status,
            weekly_release_local_time,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        };
        cohort
            .validate()
            .map_err(|e| DomainError::malformed_date("end_date", e.to_string()))?;
        Ok(cohort)
    }
}

fn to_count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[async_trait]
impl CohortRepository for PostgresCohortRepository {
    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError> {
        let row: Option<CohortRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COHORT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find cohort", e))?;

        row.map(Cohort::try_from).transpose()
    }

    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Cohort>, DomainError> {
        let rows: Vec<CohortRow> = sqlx::query_as(&format!(
            "{} WHERE course_id = $1 ORDER BY start_date ASC",
            SELECT_COHORT
        ))
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list cohorts", e))?;

        rows.into_iter().map(Cohort::try_from).collect()
    }

    async fn update_status(
        &self,
        id: &CohortId,
        status: CohortStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE cohorts SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update cohort status", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CohortNotFound,
                format!("Cohort not found: {}", id),
            ));
        }
        Ok(())
    }
}
