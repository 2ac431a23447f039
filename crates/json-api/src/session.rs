//! Session middleware.
//!
//! Resolves the shopper identity for every request from the
//! `X-Session-Token` header. A missing or malformed token gets a fresh
//! one allocated; the token in effect is echoed back on the response so
//! clients can persist it. Sessions with an attached user act as that
//! user.
//!
//! The lookup is read-only: anonymous browsing never writes a session
//! row. Rows appear only when login or guest checkout attaches a user.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::error;
use uuid::Uuid;

use globalshop_app::{domain::accounts::models::SessionUuid, identity::ShopperIdentity};

use crate::{extensions::*, state::State};

pub(crate) const SESSION_HEADER: &str = "x-session-token";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let session = extract_session_token(req).unwrap_or_else(SessionUuid::generate);

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let session_state = match state.app.accounts.lookup_session(session).await {
        Ok(session_state) => session_state,
        Err(lookup_error) => {
            error!("failed to look up session: {lookup_error}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let identity = session_state
        .user_uuid
        .map_or(ShopperIdentity::Session(session), ShopperIdentity::User);

    if res
        .add_header(SESSION_HEADER, session.to_string(), true)
        .is_err()
    {
        res.render(StatusError::internal_server_error());

        return;
    }

    depot.insert_session(session);
    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

fn extract_session_token(req: &Request) -> Option<SessionUuid> {
    let value = req.headers().get(SESSION_HEADER)?.to_str().ok()?;

    value.parse::<Uuid>().ok().map(SessionUuid::from_uuid)
}
