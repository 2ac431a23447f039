//! Errors

use salvo::http::StatusError;
use tracing::error;

use globalshop_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this phone number already exists")
        }
        AccountsServiceError::NotFound => StatusError::not_found(),
        AccountsServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid phone number or password")
        }
        AccountsServiceError::MissingRequiredData | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        AccountsServiceError::PasswordHash(reason) => {
            error!("password hashing failed: {reason}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
