//! Errors

use salvo::http::StatusError;
use tracing::error;

use globalshop_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Record already exists")
        }
        CatalogServiceError::NotFound => StatusError::not_found(),
        CatalogServiceError::InvalidReference => {
            StatusError::bad_request().brief("Referenced record does not exist")
        }
        CatalogServiceError::MissingRequiredData | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog payload")
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
