//! View Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::carts::models::{CartItem, CartView};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The lines in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of all line totals, in minor units
    pub total_sum: u64,

    /// Total number of units in the cart
    pub total_quantity: u64,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            uuid: view.cart.uuid.into(),
            items: view.items.into_iter().map(CartItemResponse::from).collect(),
            total_sum: view.summary.total_price,
            total_quantity: view.summary.total_quantity,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    /// The product in this line
    pub product_uuid: Uuid,

    /// Units of the product
    pub quantity: u64,

    /// Sell price per unit captured at the last mutation, in minor units
    pub price: u64,

    /// `quantity * price`, in minor units
    pub line_total: u64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price: item.price,
            line_total: item.line_total(),
        }
    }
}

/// View Cart Handler
///
/// Returns the shopper's cart, creating an empty one on first sight.
#[endpoint(tags("carts"), summary = "View Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let view = state
        .app
        .carts
        .view(&identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use globalshop_app::{
        domain::carts::{MockCartsService, models::*},
        identity::ShopperIdentity,
    };

    use crate::test_helpers::{MockApp, TEST_SESSION_UUID, guest_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let app = MockApp {
            carts,
            ..MockApp::default()
        };

        guest_service(app, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_view_returns_items_and_totals() -> TestResult {
        let cart_uuid = CartUuid::generate();
        let item_uuid = CartItemUuid::generate();

        let mut carts = MockCartsService::new();

        carts
            .expect_view()
            .once()
            .withf(|identity| *identity == ShopperIdentity::Session(TEST_SESSION_UUID))
            .return_once(move |_| {
                Ok(CartView {
                    cart: Cart {
                        uuid: cart_uuid,
                        user_uuid: None,
                        session_uuid: Some(TEST_SESSION_UUID),
                        created_at: Timestamp::UNIX_EPOCH,
                        updated_at: Timestamp::UNIX_EPOCH,
                    },
                    items: vec![CartItem {
                        uuid: item_uuid,
                        cart_uuid,
                        product_uuid: globalshop_app::domain::catalog::models::ProductUuid::generate(),
                        quantity: 2,
                        price: 10_00,
                        created_at: Timestamp::UNIX_EPOCH,
                        updated_at: Timestamp::UNIX_EPOCH,
                    }],
                    summary: CartSummary {
                        total_price: 20_00,
                        total_quantity: 2,
                    },
                })
            });

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.uuid, cart_uuid.into_uuid());
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].line_total, 20_00);
        assert_eq!(body.total_sum, 20_00);
        assert_eq!(body.total_quantity, 2);

        Ok(())
    }
}
