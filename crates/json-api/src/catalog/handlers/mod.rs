//! Catalog Handlers

pub(crate) mod create_category;
pub(crate) mod create_image;
pub(crate) mod create_product;
pub(crate) mod create_subcategory;
pub(crate) mod delete_image;
pub(crate) mod delete_product;
pub(crate) mod export;
pub(crate) mod get_product;
pub(crate) mod list_categories;
pub(crate) mod list_favorites;
pub(crate) mod list_products;
pub(crate) mod list_subcategories;
pub(crate) mod toggle_favorite;
pub(crate) mod update_product;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::catalog::models::{Product, ProductImage};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub title: String,

    pub description: Option<String>,

    pub slug: Option<String>,

    /// Gross price in minor units
    pub price: u64,

    /// Discount percentage, e.g. `"12.5"`
    pub discount: String,

    /// Price after the discount, in minor units
    pub sell_price: u64,

    /// Units in stock
    pub quantity: u64,

    pub out_of_stock: bool,

    pub category_uuid: Uuid,

    pub subcategory_uuid: Option<Uuid>,

    pub is_bestseller: bool,

    pub is_promo: bool,

    pub images: Vec<ProductImageResponse>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let sell_price = product.sell_price();
        let out_of_stock = product.out_of_stock();

        Self {
            uuid: product.uuid.into(),
            title: product.title,
            description: product.description,
            slug: product.slug,
            price: product.price,
            discount: product.discount.to_string(),
            sell_price,
            quantity: product.quantity,
            out_of_stock,
            category_uuid: product.category_uuid.into(),
            subcategory_uuid: product.subcategory_uuid.map(Into::into),
            is_bestseller: product.is_bestseller,
            is_promo: product.is_promo,
            images: product
                .images
                .into_iter()
                .map(ProductImageResponse::from)
                .collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product Image Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductImageResponse {
    /// The unique identifier of the image
    pub uuid: Uuid,

    pub url: String,
}

impl From<ProductImage> for ProductImageResponse {
    fn from(image: ProductImage) -> Self {
        Self {
            uuid: image.uuid.into(),
            url: image.url,
        }
    }
}

/// Parse a submitted discount percentage.
pub(crate) fn parse_discount(discount: &str) -> Result<Decimal, StatusError> {
    discount
        .trim()
        .parse::<Decimal>()
        .map_err(|_ignored| StatusError::bad_request().brief("Invalid discount percentage"))
}
