//! List Favorites Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_status_error, handlers::ProductResponse},
    extensions::*,
    state::State,
};

/// Favorites Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoritesResponse {
    pub products: Vec<ProductResponse>,

    /// Total number of favorited products
    pub count: u64,
}

/// List Favorites Handler
///
/// The signed-in shopper's favorited products, most recently marked
/// first.
#[endpoint(
    tags("catalog"),
    summary = "List Favorites",
    responses(
        (status_code = StatusCode::OK, description = "Favorites"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FavoritesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let products = state
        .app
        .catalog
        .list_favorites(user)
        .await
        .map_err(into_status_error)?;

    let count = state
        .app
        .catalog
        .favorites_count(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FavoritesResponse {
        products: products.into_iter().map(Into::into).collect(),
        count,
    }))
}
