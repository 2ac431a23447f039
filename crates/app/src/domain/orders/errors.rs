//! Checkout and order errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("passwords are missing or do not match")]
    CredentialMismatch,

    #[error("not enough stock")]
    StockExhausted,

    #[error("missing or invalid field: {0}")]
    Validation(&'static str),

    #[error("an account with this phone number already exists")]
    AlreadyExists,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::Validation("invalid data"),
            Some(
                ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation | ErrorKind::Other | _,
            )
            | None => Self::Sql(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order belongs to another account")]
    AccessDenied,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
