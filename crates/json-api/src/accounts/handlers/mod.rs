//! Account Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod profile;
pub(crate) mod register;
pub(crate) mod update_profile;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use globalshop_app::domain::accounts::models::User;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// The phone number the user signs in with
    pub phone_number: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// The date and time the account was created
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into(),
            phone_number: user.phone_number,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at.to_string(),
        }
    }
}
