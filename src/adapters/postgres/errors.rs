//! Mapping of sqlx failures onto domain error codes.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Connection-level failures are retryable; decode failures are bad rows.
pub(super) fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            DomainError::store_unavailable(format!("{}: {}", context, err))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DomainError::malformed_date("row", format!("{}: {}", context, err))
        }
        other => DomainError::new(ErrorCode::InternalError, format!("{}: {}", context, other)),
    }
}
