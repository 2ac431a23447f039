//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartTotalsResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartTotalsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let summary = state
        .app
        .carts
        .remove_item(&identity, item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
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

        guest_service(app, Router::with_path("cart/items/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_returns_200() -> TestResult {
        let item = CartItemUuid::generate();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |_, i| *i == item)
            .return_once(|_, _| Ok(CartSummary::default()));

        let res = TestClient::delete(format!("http://example.com/cart/items/{item}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
