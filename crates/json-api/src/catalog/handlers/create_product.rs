//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::{NewProduct, ProductUuid};

use crate::{
    catalog::{
        errors::into_status_error,
        handlers::{ProductResponse, parse_discount},
    },
    extensions::*,
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub title: String,

    pub description: Option<String>,

    pub slug: Option<String>,

    /// Gross price in minor units
    pub price: u64,

    /// Discount percentage, e.g. `"12.5"`. Defaults to none.
    pub discount: Option<String>,

    /// Units in stock
    pub quantity: u64,

    pub category_uuid: Uuid,

    pub subcategory_uuid: Option<Uuid>,

    #[serde(default)]
    pub is_bestseller: bool,

    #[serde(default)]
    pub is_promo: bool,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, StatusError> {
        let discount = match self.discount.as_deref() {
            Some(discount) => parse_discount(discount)?,
            None => rust_decimal::Decimal::ZERO,
        };

        Ok(NewProduct {
            uuid: ProductUuid::generate(),
            title: self.title,
            description: self.description,
            slug: self.slug,
            price: self.price,
            discount,
            quantity: self.quantity,
            category_uuid: self.category_uuid.into(),
            subcategory_uuid: self.subcategory_uuid.map(Into::into),
            is_bestseller: self.is_bestseller,
            is_promo: self.is_promo,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_product = json.into_inner().into_new_product()?;

    let product = state
        .app
        .catalog
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
