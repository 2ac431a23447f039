//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    catalog::{errors::into_status_error, handlers::ProductResponse},
    extensions::*,
    state::State,
};

/// Get Product Handler
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .catalog
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use globalshop_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, models::ProductUuid,
    };

    use crate::test_helpers::{MockApp, guest_service, make_product};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        let app = MockApp {
            catalog,
            ..MockApp::default()
        };

        guest_service(app, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_the_product() -> TestResult {
        let uuid = ProductUuid::generate();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(move |p| *p == uuid)
            .return_once(move |_| Ok(make_product(uuid, "Handset", 10_00)));

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/products/{}",
            ProductUuid::generate()
        ))
        .send(&make_service(catalog))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
