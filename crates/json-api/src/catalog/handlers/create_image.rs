//! Create Product Image Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::{NewProductImage, ProductImageUuid};

use crate::{
    catalog::{errors::into_status_error, handlers::ProductImageResponse},
    extensions::*,
    state::State,
};

/// Create Product Image Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateImageRequest {
    /// Where the image is hosted
    pub url: String,
}

/// Create Product Image Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Product Image",
    responses(
        (status_code = StatusCode::CREATED, description = "Image attached"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product or empty url"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateImageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductImageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let image = state
        .app
        .catalog
        .add_product_image(NewProductImage {
            uuid: ProductImageUuid::generate(),
            product_uuid: product.into_inner().into(),
            url: json.into_inner().url,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(image.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use globalshop_app::domain::catalog::{
        CatalogServiceError, MockCatalogService,
        models::{ProductImage, ProductUuid},
    };

    use crate::test_helpers::{MockApp, guest_service};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        let app = MockApp {
            catalog,
            ..MockApp::default()
        };

        guest_service(
            app,
            Router::with_path("products/{product}/images").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_image_returns_201() -> TestResult {
        let product = ProductUuid::generate();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_add_product_image()
            .once()
            .withf(move |new| new.product_uuid == product && new.url == "https://cdn/img.png")
            .return_once(|new| {
                Ok(ProductImage {
                    uuid: new.uuid,
                    product_uuid: new.product_uuid,
                    url: new.url,
                    created_at: jiff::Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post(format!("http://example.com/products/{product}/images"))
            .json(&json!({ "url": "https://cdn/img.png" }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ProductImageResponse = res.take_json().await?;

        assert_eq!(body.url, "https://cdn/img.png");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_add_product_image()
            .once()
            .return_once(|_| Err(CatalogServiceError::InvalidReference));

        let res = TestClient::post(format!(
            "http://example.com/products/{}/images",
            ProductUuid::generate()
        ))
        .json(&json!({ "url": "https://cdn/img.png" }))
        .send(&make_service(catalog))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
