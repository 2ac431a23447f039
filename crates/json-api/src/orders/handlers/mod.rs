//! Order Handlers

pub(crate) mod checkout;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod prefill;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::orders::models::{Order, OrderStatus, PaymentMethod};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    pub status: String,

    pub payment_method: String,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            status: status_label(order.status).to_string(),
            payment_method: payment_label(order.payment_method).to_string(),
            created_at: order.created_at.to_string(),
        }
    }
}

pub(crate) fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Completed => "completed",
        OrderStatus::Canceled => "canceled",
        OrderStatus::Paid => "paid",
    }
}

pub(crate) fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Card => "card",
    }
}
