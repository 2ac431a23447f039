//! Errors

use salvo::http::StatusError;
use tracing::error;

use globalshop_app::domain::orders::{CheckoutError, OrdersServiceError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AccessDenied => {
            StatusError::forbidden().brief("Order belongs to another account")
        }
        OrdersServiceError::Sql(source) => {
            error!("order lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn checkout_into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutError::CredentialMismatch => {
            StatusError::bad_request().brief("Passwords are missing or do not match")
        }
        CheckoutError::StockExhausted => StatusError::conflict().brief("Not enough stock"),
        CheckoutError::Validation(field) => {
            StatusError::bad_request().brief(format!("Missing or invalid field: {field}"))
        }
        CheckoutError::AlreadyExists => {
            StatusError::conflict().brief("An account with this phone number already exists")
        }
        CheckoutError::PasswordHash(reason) => {
            error!("password hashing failed: {reason}");

            StatusError::internal_server_error()
        }
        CheckoutError::Sql(source) => {
            error!("checkout failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
