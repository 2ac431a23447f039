//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    accounts::{errors::into_status_error, handlers::UserResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Login Handler
///
/// Verifies credentials and attaches the current session token to the
/// user, so subsequent requests carry their identity.
#[endpoint(
    tags("accounts"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_500()?;

    let request = json.into_inner();

    let user = state
        .app
        .accounts
        .login(session, request.phone_number, request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
