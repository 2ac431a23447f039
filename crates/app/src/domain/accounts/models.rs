//! Account Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// User Model
///
/// The phone number is the login identifier; the password hash never
/// leaves the repository layer.
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub phone_number: String,
    pub password: String,
}

/// Profile Update Model
///
/// Only present, non-empty fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// Anonymous session marker type.
#[derive(Debug, Clone)]
pub struct Session;

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

/// Session state: anonymous until a user is attached by login or by a
/// guest checkout that created an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub uuid: SessionUuid,
    pub user_uuid: Option<UserUuid>,
}
