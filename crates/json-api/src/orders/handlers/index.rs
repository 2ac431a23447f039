//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// List Orders Handler
///
/// The signed-in shopper's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
