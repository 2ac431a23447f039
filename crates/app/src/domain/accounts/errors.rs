//! Accounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("an account with this phone number already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    #[error("invalid phone number or password")]
    InvalidCredentials,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation | ErrorKind::ForeignKeyViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
