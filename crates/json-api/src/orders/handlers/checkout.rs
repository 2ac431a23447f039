//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::FormBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::orders::models::{CheckoutForm, NewAddress, PaymentMethod};

use crate::{extensions::*, orders::errors::checkout_into_status_error, state::State};

/// Checkout Request
///
/// Submitted as a form. Guests must fill both password fields; signed-in
/// shoppers leave them empty.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone_number: String,

    pub password: Option<String>,

    pub password2: Option<String>,

    pub city: String,

    pub street: String,

    pub house: String,

    #[serde(default)]
    pub building: String,

    pub apartment: String,

    pub postal_code: String,

    /// `"cash"` or `"card"`
    pub payment_method: String,
}

impl CheckoutRequest {
    fn into_form(self) -> Result<CheckoutForm, StatusError> {
        let payment_method = match self.payment_method.as_str() {
            "cash" => PaymentMethod::Cash,
            "card" => PaymentMethod::Card,
            _ => return Err(StatusError::bad_request().brief("Unknown payment method")),
        };

        Ok(CheckoutForm {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            password: self.password,
            password2: self.password2,
            address: NewAddress {
                city: self.city,
                street: self.street,
                house: self.house,
                building: self.building,
                apartment: self.apartment,
                postal_code: self.postal_code,
            },
            payment_method,
        })
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub success: bool,

    /// The placed order
    pub order_uuid: Uuid,

    /// Whether a new account was created for a guest shopper
    pub created_account: bool,
}

/// Checkout Handler
///
/// Places an order from the shopper's cart in a single transaction:
/// stock is decremented, the cart is emptied, and for guests an account
/// is created and attached to the session.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid form"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
    ),
)]
pub(crate) async fn handler(
    form: FormBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let form = form.into_inner().into_form()?;

    // For guests the service creates an account and attaches it to the
    // session inside the same transaction, so the next request is
    // already signed in.
    let outcome = state
        .app
        .checkout
        .checkout(&identity, form)
        .await
        .map_err(checkout_into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        success: true,
        order_uuid: outcome.order.uuid.into(),
        created_account: outcome.created_account,
    }))
}
