//! Shopper identity context.
//!
//! Cart resolution and checkout are keyed on who is shopping: an
//! authenticated user, or an anonymous session. The identity is passed
//! explicitly into every service call rather than read from ambient
//! request state.

use crate::domain::accounts::models::{SessionUuid, UserUuid};

/// The owner of a cart: exactly one of an authenticated user or an
/// anonymous session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopperIdentity {
    User(UserUuid),
    Session(SessionUuid),
}

impl ShopperIdentity {
    #[must_use]
    pub fn user_uuid(&self) -> Option<UserUuid> {
        match self {
            Self::User(uuid) => Some(*uuid),
            Self::Session(_) => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}
