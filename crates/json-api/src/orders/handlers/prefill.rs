//! Checkout Prefill Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    accounts::errors::into_status_error as account_into_status_error,
    extensions::*,
    orders::{errors::into_status_error, handlers::get::AddressResponse},
    state::State,
};

/// Checkout Prefill Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PrefillResponse {
    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub phone_number: String,

    /// The shopper's most recently used shipping address, if any
    pub address: Option<AddressResponse>,
}

/// Checkout Prefill Handler
///
/// Returns the signed-in shopper's profile fields and latest shipping
/// address so the checkout form can be prefilled. Guests get an empty
/// prefill.
#[endpoint(tags("orders"), summary = "Checkout Prefill")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PrefillResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(user_uuid) = depot.identity_or_500()?.user_uuid() else {
        return Ok(Json(PrefillResponse {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            address: None,
        }));
    };

    let user = state
        .app
        .accounts
        .get_user(user_uuid)
        .await
        .map_err(account_into_status_error)?;

    let address = state
        .app
        .orders
        .latest_address(user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PrefillResponse {
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        phone_number: user.phone_number,
        address: address.map(Into::into),
    }))
}
