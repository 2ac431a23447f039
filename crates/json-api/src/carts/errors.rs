//! Errors

use salvo::http::StatusError;
use tracing::error;

use globalshop_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::StockExhausted => StatusError::conflict().brief("Not enough stock"),
        CartsServiceError::InvalidQuantityDelta => {
            StatusError::bad_request().brief("Quantity change must be non-zero")
        }
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
