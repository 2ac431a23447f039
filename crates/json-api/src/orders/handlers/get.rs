//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::{ToSchema, extract::PathParam}, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::orders::models::{Address, OrderDetail, OrderLine};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// Order Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailResponse {
    pub order: OrderResponse,

    pub lines: Vec<OrderLineResponse>,

    pub address: Option<AddressResponse>,

    /// Sum of all line subtotals, in minor units
    pub total_cost: u64,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        let total_cost = detail.total_cost();

        Self {
            order: detail.order.into(),
            lines: detail.lines.into_iter().map(Into::into).collect(),
            address: detail.address.map(Into::into),
            total_cost,
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The unique identifier of the line
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Product title at read time
    pub title: String,

    /// Units ordered, frozen at checkout
    pub quantity: u64,

    /// Current sell price per unit, in minor units
    pub unit_price: u64,

    /// `quantity * unit_price`, in minor units
    pub subtotal: u64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        let subtotal = line.subtotal();

        Self {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            title: line.title,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal,
        }
    }
}

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub city: String,
    pub street: String,
    pub house: String,
    pub building: String,
    pub apartment: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            city: address.city,
            street: address.street,
            house: address.house,
            building: address.building,
            apartment: address.apartment,
            postal_code: address.postal_code,
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order detail"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another account"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let detail = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
