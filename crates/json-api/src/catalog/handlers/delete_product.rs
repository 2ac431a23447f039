//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Delete Product Handler
///
/// Removes the product along with its images, favorites, and cart lines.
#[endpoint(
    tags("catalog"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .catalog
        .delete_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
