//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use globalshop_app::domain::accounts::models::ProfileUpdate;

use crate::{
    accounts::{errors::into_status_error, handlers::UserResponse},
    extensions::*,
    state::State,
};

/// Update Profile Request
///
/// Absent fields keep their current value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("accounts"),
    summary = "Update Profile",
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let updated = state
        .app
        .accounts
        .update_profile(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use globalshop_app::domain::accounts::MockAccountsService;

    use crate::test_helpers::{MockApp, TEST_USER_UUID, make_user, user_service};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        let app = MockApp {
            accounts,
            ..MockApp::default()
        };

        user_service(app, Router::with_path("accounts/profile").put(handler))
    }

    #[tokio::test]
    async fn test_update_forwards_only_submitted_fields() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && update.first_name.as_deref() == Some("Lisa")
                    && update.last_name.is_none()
                    && update.email.is_none()
            })
            .return_once(|user, update| {
                let mut updated = make_user(user, "+15550001111");

                if let Some(first_name) = update.first_name {
                    updated.first_name = first_name;
                }

                Ok(updated)
            });

        let mut res = TestClient::put("http://example.com/accounts/profile")
            .json(&json!({ "first_name": "Lisa" }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UserResponse = res.take_json().await?;

        assert_eq!(body.first_name, "Lisa");

        Ok(())
    }
}
