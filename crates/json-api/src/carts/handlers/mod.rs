//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod remove_item;
pub(crate) mod update_item;
pub(crate) mod view;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use globalshop_app::domain::carts::models::CartSummary;

/// Cart Totals Response
///
/// Returned by every cart mutation so the client can refresh its badge
/// without a second request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartTotalsResponse {
    pub success: bool,

    /// Sum of `quantity * price` across all lines, in minor units
    pub total_sum: u64,

    /// Total number of units in the cart
    pub total_quantity: u64,
}

impl From<CartSummary> for CartTotalsResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            success: true,
            total_sum: summary.total_price,
            total_quantity: summary.total_quantity,
        }
    }
}
