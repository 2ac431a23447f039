//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use globalshop_app::domain::accounts::AccountsServiceError;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Logout Handler
///
/// Discards the session row entirely. The client's next request gets a
/// fresh anonymous session. Signing out an already-discarded session is
/// a no-op rather than an error.
#[endpoint(
    tags("accounts"),
    summary = "Logout",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Signed out"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_500()?;

    match state.app.accounts.logout(session).await {
        Ok(()) | Err(AccountsServiceError::NotFound) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(into_status_error(error)),
    }
}
