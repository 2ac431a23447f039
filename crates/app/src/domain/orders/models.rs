//! Order Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::accounts::models::UserUuid,
    domain::catalog::models::ProductUuid,
    uuids::TypedUuid,
};

/// Address UUID
pub type AddressUuid = TypedUuid<Address>;

/// Shipping Address Model
#[derive(Debug, Clone)]
pub struct Address {
    pub uuid: AddressUuid,
    pub user_uuid: UserUuid,
    pub city: String,
    pub street: String,
    pub house: String,
    pub building: String,
    pub apartment: String,
    pub postal_code: String,
    pub created_at: Timestamp,
}

/// Submitted address fields, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub city: String,
    pub street: String,
    pub house: String,
    pub building: String,
    pub apartment: String,
    pub postal_code: String,
}

impl NewAddress {
    /// Trim every field and upper-case city and street, so equal
    /// addresses compare equal regardless of how they were typed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            city: self.city.trim().to_uppercase(),
            street: self.street.trim().to_uppercase(),
            house: self.house.trim().to_string(),
            building: self.building.trim().to_string(),
            apartment: self.apartment.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        }
    }

    /// Fields the checkout form requires. Building is optional.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.city.is_empty() {
            return Some("city");
        }
        if self.street.is_empty() {
            return Some("street");
        }
        if self.house.is_empty() {
            return Some("house");
        }
        if self.apartment.is_empty() {
            return Some("apartment");
        }
        if self.postal_code.is_empty() {
            return Some("postal_code");
        }

        None
    }
}

/// Order Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Canceled,
    Paid,
}

/// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub address_uuid: Option<AddressUuid>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: Timestamp,
}

impl Order {
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderLine>;

/// An order position joined with its product.
///
/// `quantity` was frozen at order time; the unit price reflects the
/// product's current sell price.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub title: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub created_at: Timestamp,
}

impl OrderLine {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.quantity * self.unit_price
    }
}

/// An order with its lines and shipping address.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub address: Option<Address>,
}

impl OrderDetail {
    /// Total cost, computed from the lines rather than stored.
    #[must_use]
    pub fn total_cost(&self) -> u64 {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }
}

/// Submitted checkout form.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: Option<String>,
    pub password2: Option<String>,
    pub address: NewAddress,
    pub payment_method: PaymentMethod,
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub user_uuid: UserUuid,
    /// Whether a new account was created for a guest shopper.
    pub created_account: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_uppercases_city_and_street_only() {
        let address = NewAddress {
            city: "  Springfield ".to_string(),
            street: "evergreen terrace".to_string(),
            house: " 742 ".to_string(),
            building: String::new(),
            apartment: "1".to_string(),
            postal_code: " 49007 ".to_string(),
        };

        let normalized = address.normalized();

        assert_eq!(normalized.city, "SPRINGFIELD");
        assert_eq!(normalized.street, "EVERGREEN TERRACE");
        assert_eq!(normalized.house, "742");
        assert_eq!(normalized.postal_code, "49007");
    }

    #[test]
    fn building_is_not_required() {
        let address = NewAddress {
            city: "SPRINGFIELD".to_string(),
            street: "EVERGREEN TERRACE".to_string(),
            house: "742".to_string(),
            building: String::new(),
            apartment: "1".to_string(),
            postal_code: "49007".to_string(),
        };

        assert_eq!(address.missing_field(), None);

        let missing = NewAddress {
            apartment: String::new(),
            ..address
        };

        assert_eq!(missing.missing_field(), Some("apartment"));
    }
}
