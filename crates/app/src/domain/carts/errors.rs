//! Cart service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("record not found")]
    NotFound,

    #[error("not enough stock")]
    StockExhausted,

    #[error("quantity change must be non-zero")]
    InvalidQuantityDelta,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::UniqueViolation) => Self::InvalidData,
            Some(ErrorKind::NotNullViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
