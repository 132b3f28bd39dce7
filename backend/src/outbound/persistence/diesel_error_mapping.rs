//! Shared Diesel error classification for the SQLite repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// How a Diesel failure should surface through a port error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique index rejected the write.
    UniqueViolation(String),
    /// The database was locked or the connection is gone.
    Unavailable(String),
    /// Anything else.
    Query(String),
}

/// Classify a Diesel error and log its detail.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            let message = info.message().to_owned();
            debug!(?kind, %message, %operation, "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation(message),
                DatabaseErrorKind::ClosedConnection => DieselFailure::Unavailable(message),
                _ if is_busy_message(&message) => DieselFailure::Unavailable(message),
                _ => DieselFailure::Query(message),
            }
        }
        other => {
            let message = other.to_string();
            debug!(%message, %operation, "diesel operation failed");
            if is_busy_message(&message) {
                DieselFailure::Unavailable(message)
            } else {
                DieselFailure::Query(message)
            }
        }
    }
}

fn is_busy_message(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("database is locked") || lower.contains("database is busy")
}

/// Extract the message carried by a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}
