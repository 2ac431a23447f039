//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use globalshop_app::domain::accounts::models::NewUser;

use crate::{
    accounts::{errors::into_status_error, handlers::UserResponse},
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub phone_number: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            phone_number: request.phone_number,
            password: request.password,
        }
    }
}

/// Register Handler
///
/// Creates an account keyed on the phone number. Registration does not
/// sign the shopper in; clients follow up with a login request.
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Phone number already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
