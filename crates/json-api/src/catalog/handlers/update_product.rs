//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::ProductUpdate;

use crate::{
    catalog::{
        errors::into_status_error,
        handlers::{ProductResponse, parse_discount},
    },
    extensions::*,
    state::State,
};

/// Update Product Request
///
/// A full replacement of the product's editable fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub title: String,

    pub description: Option<String>,

    pub slug: Option<String>,

    /// Gross price in minor units
    pub price: u64,

    /// Discount percentage, e.g. `"12.5"`
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

impl UpdateProductRequest {
    fn into_update(self) -> Result<ProductUpdate, StatusError> {
        let discount = match self.discount.as_deref() {
            Some(discount) => parse_discount(discount)?,
            None => rust_decimal::Decimal::ZERO,
        };

        Ok(ProductUpdate {
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

/// Update Product Handler
#[endpoint(
    tags("catalog"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = json.into_inner().into_update()?;

    let updated = state
        .app
        .catalog
        .update_product(product.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
