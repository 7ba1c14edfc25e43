//! PostgreSQL implementation of EnrollmentRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::map_sqlx_error;
use crate::domain::cohort::Enrollment;
use crate::domain::foundation::{CohortId, DomainError, ErrorCode, StudentId};
use crate::ports::EnrollmentRepository;

pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    student_id: String,
    cohort_id: Uuid,
    status: String,
    timezone: Option<String>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DomainError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let invalid = |e: crate::domain::foundation::ValidationError| {
            DomainError::new(ErrorCode::InternalError, format!("Invalid enrollment row: {}", e))
        };
        Ok(Enrollment {
            student_id: StudentId::new(row.student_id).map_err(invalid)?,
            cohort_id: CohortId::from_uuid(row.cohort_id),
            status: row.status.parse().map_err(invalid)?,
            timezone: row.timezone,
        })
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn find(
        &self,
        student_id: &StudentId,
        cohort_id: &CohortId,
    ) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(
            r#"
            SELECT student_id, cohort_id, status, timezone
            FROM enrollments
            WHERE student_id = $1 AND cohort_id = $2
            "#,
        )
        .bind(student_id.as_str())
        .bind(cohort_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find enrollment", e))?;

        row.map(Enrollment::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cohort::EnrollmentStatus;

    #[test]
    fn converts_row_with_timezone() {
        let enrollment = Enrollment::try_from(EnrollmentRow {
            student_id: "s-1".to_string(),
            cohort_id: Uuid::new_v4(),
            status: "active".to_string(),
            timezone: Some("Asia/Tokyo".to_string()),
        })
        .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.timezone_or_default(), "Asia/Tokyo");
    }

    #[test]
    fn blank_student_id_is_rejected() {
        let result = Enrollment::try_from(EnrollmentRow {
            student_id: " ".to_string(),
            cohort_id: Uuid::new_v4(),
            status: "active".to_string(),
            timezone: None,
        });
        assert!(result.is_err());
    }
}
