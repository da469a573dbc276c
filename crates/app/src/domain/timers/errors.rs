//! Timers service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Timers service errors
#[derive(Debug, Error)]
pub enum TimersServiceError {
    /// A timer with this UUID already exists
    #[error("timer already exists")]
    AlreadyExists,

    /// No timer with this UUID is visible to the shop
    #[error("timer not found")]
    NotFound,

    /// The timer belongs to a shop that is not installed
    #[error("related resource not found")]
    InvalidReference,

    /// A required column was null
    #[error("missing required data")]
    MissingRequiredData,

    /// Rejected by a table constraint
    #[error("invalid data")]
    InvalidData,

    /// The document names a different shop than the caller
    #[error("timer belongs to another shop")]
    ShopMismatch,

    /// Any other storage failure, including undecodable rows
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TimersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            TimersServiceError::from(Error::RowNotFound),
            TimersServiceError::NotFound
        ));
    }

    #[test]
    fn non_database_errors_are_storage_errors() {
        assert!(matches!(
            TimersServiceError::from(Error::PoolTimedOut),
            TimersServiceError::Sql(_)
        ));
    }
}
