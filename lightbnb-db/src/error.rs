//! Error type shared by all repositories

use lightbnb_core::ValidationError;
use thiserror::Error;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A unique constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input rejected before any SQL was sent
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl DbError {
    /// Classify a failed query and record it in the log.
    pub(crate) fn from_query(operation: &'static str, err: sqlx::Error) -> Self {
        tracing::error!(operation, error = %err, "query failed");

        let unique_violation = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if unique_violation {
            let detail = err
                .as_database_error()
                .and_then(|db_err| db_err.constraint().map(str::to_owned))
                .unwrap_or_else(|| operation.to_owned());
            return Self::Conflict(detail);
        }

        Self::Sqlx(err)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
