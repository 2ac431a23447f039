//! Toggle Favorite Handler

use std::sync::Arc;

use salvo::{oapi::{ToSchema, extract::PathParam}, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Toggle Favorite Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleFavoriteResponse {
    /// Whether the product is favorited after the toggle
    pub favorited: bool,
}

/// Toggle Favorite Handler
///
/// Flips the favorite mark for the signed-in shopper.
#[endpoint(
    tags("catalog"),
    summary = "Toggle Favorite",
    responses(
        (status_code = StatusCode::OK, description = "New favorite state"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ToggleFavoriteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let favorited = state
        .app
        .catalog
        .toggle_favorite(user, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ToggleFavoriteResponse { favorited }))
}
