//! List Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, handlers::ProductResponse},
    extensions::*,
    state::State,
};

/// List Products Handler
///
/// All products, newest first, with their images.
#[endpoint(tags("catalog"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .catalog
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
