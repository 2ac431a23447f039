//! Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    accounts::{errors::into_status_error, handlers::UserResponse},
    extensions::*,
    state::State,
};

/// Profile Handler
///
/// Returns the signed-in shopper's profile.
#[endpoint(
    tags("accounts"),
    summary = "Profile",
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let user = state
        .app
        .accounts
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use globalshop_app::domain::accounts::MockAccountsService;

    use crate::test_helpers::{MockApp, TEST_USER_UUID, guest_service, make_user, user_service};

    use super::*;

    #[tokio::test]
    async fn test_profile_returns_the_current_user() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| Ok(make_user(user, "+15550001111")));

        let app = MockApp {
            accounts,
            ..MockApp::default()
        };

        let service = user_service(app, Router::with_path("accounts/profile").get(handler));

        let mut res = TestClient::get("http://example.com/accounts/profile")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UserResponse = res.take_json().await?;

        assert_eq!(body.uuid, TEST_USER_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_profile_returns_401() -> TestResult {
        let service = guest_service(
            MockApp::default(),
            Router::with_path("accounts/profile").get(handler),
        );

        let res = TestClient::get("http://example.com/accounts/profile")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
