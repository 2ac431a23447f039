//! Delete Product Image Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Delete Product Image Handler
#[endpoint(
    tags("catalog"),
    summary = "Delete Product Image",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Image removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Image not found"),
    ),
)]
pub(crate) async fn handler(
    image: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .catalog
        .delete_product_image(image.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
