//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::accounts::models::{SessionUuid, UserUuid},
    domain::catalog::models::ProductUuid,
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// Exactly one of `user_uuid` and `session_uuid` is set.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user_uuid: Option<UserUuid>,
    pub session_uuid: Option<SessionUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Item Model
///
/// `price` is the sell price in minor units captured at the most recent
/// mutation of this line.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.quantity * self.price
    }
}

/// Cart totals in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
    pub total_price: u64,
    pub total_quantity: u64,
}

/// A cart with its line items and totals.
#[derive(Debug, Clone)]
pub struct CartView {
    pub cart: Cart,
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}
