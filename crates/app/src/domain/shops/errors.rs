//! Shops service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Shops service errors
#[derive(Debug, Error)]
pub enum ShopsServiceError {
    /// A shop with this domain is already installed
    #[error("shop already exists")]
    AlreadyExists,

    /// Rejected by a table constraint
    #[error("invalid data")]
    InvalidData,

    /// Any other storage failure
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ShopsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
