//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartTotalsResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    /// The product to add one unit of
    pub product_uuid: Uuid,
}

/// Add Cart Item Handler
///
/// Adds one unit of a product to the shopper's cart, merging into an
/// existing line for the same product.
#[endpoint(
    tags("carts"),
    summary = "Add Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartTotalsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let summary = state
        .app
        .carts
        .add_item(&identity, json.into_inner().product_uuid.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use globalshop_app::{
        domain::carts::{CartsServiceError, MockCartsService, models::CartSummary},
        domain::catalog::models::ProductUuid,
        identity::ShopperIdentity,
    };

    use crate::test_helpers::{MockApp, TEST_SESSION_UUID, guest_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let app = MockApp {
            carts,
            ..MockApp::default()
        };

        guest_service(app, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_returns_new_totals() -> TestResult {
        let product = ProductUuid::generate();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |identity, p| {
                *identity == ShopperIdentity::Session(TEST_SESSION_UUID) && *p == product
            })
            .return_once(|_, _| {
                Ok(CartSummary {
                    total_price: 15_00,
                    total_quantity: 3,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartTotalsResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.total_sum, 15_00);
        assert_eq!(body.total_quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_out_of_stock_returns_409() -> TestResult {
        let product = ProductUuid::generate();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::StockExhausted));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
