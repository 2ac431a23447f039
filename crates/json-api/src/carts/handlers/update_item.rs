//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartTotalsResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    /// Signed change to the line quantity. A change that brings the
    /// quantity to zero or below removes the line.
    pub quantity_delta: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Zero quantity change"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartTotalsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let summary = state
        .app
        .carts
        .update_quantity(
            &identity,
            item.into_inner().into(),
            json.into_inner().quantity_delta,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use globalshop_app::domain::carts::{
        CartsServiceError, MockCartsService,
        models::{CartItemUuid, CartSummary},
    };

    use crate::test_helpers::{MockApp, guest_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let app = MockApp {
            carts,
            ..MockApp::default()
        };

        guest_service(app, Router::with_path("cart/items/{item}").post(handler))
    }

    #[tokio::test]
    async fn test_decrement_forwards_the_delta() -> TestResult {
        let item = CartItemUuid::generate();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |_, i, delta| *i == item && *delta == -1)
            .return_once(|_, _, _| Ok(CartSummary::default()));

        let mut res = TestClient::post(format!("http://example.com/cart/items/{item}"))
            .json(&json!({ "quantity_delta": -1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartTotalsResponse = res.take_json().await?;

        assert_eq!(body.total_quantity, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_delta_returns_400() -> TestResult {
        let item = CartItemUuid::generate();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantityDelta));

        let res = TestClient::post(format!("http://example.com/cart/items/{item}"))
            .json(&json!({ "quantity_delta": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
