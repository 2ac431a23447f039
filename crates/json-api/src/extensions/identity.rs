//! Shopper identity depot extensions.

use salvo::prelude::{Depot, StatusError};

use globalshop_app::{
    domain::accounts::models::{SessionUuid, UserUuid},
    identity::ShopperIdentity,
};

const IDENTITY_KEY: &str = "globalshop::identity";
const SESSION_KEY: &str = "globalshop::session";

/// Access to the identity resolved by the session middleware.
pub(crate) trait IdentityExt {
    fn insert_identity(&mut self, identity: ShopperIdentity);

    fn insert_session(&mut self, session: SessionUuid);

    /// The identity the session middleware resolved for this request.
    fn identity_or_500(&self) -> Result<ShopperIdentity, StatusError>;

    /// The session token in effect, regardless of who owns it.
    fn session_or_500(&self) -> Result<SessionUuid, StatusError>;

    /// The authenticated user, or 401 for anonymous sessions.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl IdentityExt for Depot {
    fn insert_identity(&mut self, identity: ShopperIdentity) {
        self.insert(IDENTITY_KEY, identity);
    }

    fn insert_session(&mut self, session: SessionUuid) {
        self.insert(SESSION_KEY, session);
    }

    fn identity_or_500(&self) -> Result<ShopperIdentity, StatusError> {
        self.get::<ShopperIdentity>(IDENTITY_KEY)
            .copied()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn session_or_500(&self) -> Result<SessionUuid, StatusError> {
        self.get::<SessionUuid>(SESSION_KEY)
            .copied()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.identity_or_500()?
            .user_uuid()
            .ok_or_else(|| StatusError::unauthorized().brief("Sign in required"))
    }
}
