//! Catalog Models

use jiff::Timestamp;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Category Model
#[derive(Debug, Clone)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub title: String,
    pub slug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Category Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub title: String,
    pub slug: Option<String>,
}

/// Subcategory UUID
pub type SubcategoryUuid = TypedUuid<Subcategory>;

/// Subcategory Model
#[derive(Debug, Clone)]
pub struct Subcategory {
    pub uuid: SubcategoryUuid,
    pub title: String,
    pub slug: Option<String>,
    pub category_uuid: CategoryUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Subcategory Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubcategory {
    pub uuid: SubcategoryUuid,
    pub title: String,
    pub slug: Option<String>,
    pub category_uuid: CategoryUuid,
}

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// `price` is in minor units (cents); `discount` is a percentage.
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub price: u64,
    pub discount: Decimal,
    pub quantity: u64,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub is_bestseller: bool,
    pub is_promo: bool,
    pub images: Vec<ProductImage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Price after the discount percentage, rounded to the nearest cent.
    #[must_use]
    pub fn sell_price(&self) -> u64 {
        sell_price(self.price, self.discount)
    }

    #[must_use]
    pub fn out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    #[must_use]
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

/// Compute the sell price in minor units.
///
/// `round(price - price * discount / 100, 2)` on major units, which on
/// cents is a round to the nearest integer. Ties go to even.
#[must_use]
pub fn sell_price(price: u64, discount: Decimal) -> u64 {
    if discount.is_zero() {
        return price;
    }

    let gross = Decimal::from(price);
    let net = (gross - gross * discount / Decimal::ONE_HUNDRED).round_dp(0);

    net.to_u64().unwrap_or(price)
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub price: u64,
    pub discount: Decimal,
    pub quantity: u64,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub is_bestseller: bool,
    pub is_promo: bool,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub price: u64,
    pub discount: Decimal,
    pub quantity: u64,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub is_bestseller: bool,
    pub is_promo: bool,
}

/// Product Image UUID
pub type ProductImageUuid = TypedUuid<ProductImage>;

/// Product Image Model
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub uuid: ProductImageUuid,
    pub product_uuid: ProductUuid,
    pub url: String,
    pub created_at: Timestamp,
}

/// New Product Image Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductImage {
    pub uuid: ProductImageUuid,
    pub product_uuid: ProductUuid,
    pub url: String,
}
