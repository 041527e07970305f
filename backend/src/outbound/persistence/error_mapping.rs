//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract the message from a pool failure.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Reduce a Diesel error to a loggable message, logging the raw detail at
/// debug level. The raw database message stays out of the returned string so
/// it cannot ride an error payload to a client.
pub(crate) fn diesel_error_message(error: &DieselError, context: &'static str) -> String {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), context, "diesel operation failed");
        }
        other => {
            debug!(error = %other, context, "diesel operation failed");
        }
    }
    format!("{context}: database error")
}

/// Unique-constraint classification for insert failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UniqueViolation {
    Email,
    Username,
    Other,
}

/// Classify a unique-key violation by the constraint it tripped.
pub(crate) fn detect_unique_violation(error: &DieselError) -> Option<UniqueViolation> {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().unwrap_or_default();
    if constraint.contains("email") {
        Some(UniqueViolation::Email)
    } else if constraint.contains("username") {
        Some(UniqueViolation::Username)
    } else {
        Some(UniqueViolation::Other)
    }
}
