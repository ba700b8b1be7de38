//! Session endpoints.

use axum::{http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::api::ErrorDto,
    server::{error::Error, model::session::user::SessionUserId},
};

/// OpenAPI tag of the authentication routes.
pub static AUTH_TAG: &str = "auth";

/// Logs the user out by clearing their session
///
/// # Responses
/// - 204 (No Content): Session cleared, or there was no user in session
/// - 500 (Internal Server Error): There was an issue reading the session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user_id = SessionUserId::get(&session).await?;

    // Clearing a session that was never persisted is a no-op, skip it
    if let Some(user_id) = maybe_user_id {
        session.clear().await;

        tracing::debug!(user_id = %user_id, "User logged out");
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::server::{
        controller::auth::logout, error::Error, model::session::user::SessionUserId,
        util::test::session_test_setup,
    };

    /// Expect 204 and an empty session after logging out a logged in user
    #[tokio::test]
    async fn clears_session_of_logged_in_user() -> Result<(), Error> {
        let session = session_test_setup();
        SessionUserId::insert(&session, 1).await?;

        let resp = logout(session.clone()).await?.into_response();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(SessionUserId::get(&session).await?.is_none());

        Ok(())
    }

    /// Expect 204 when nobody is logged in
    #[tokio::test]
    async fn succeeds_without_user_in_session() -> Result<(), Error> {
        let session = session_test_setup();

        let resp = logout(session).await?.into_response();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        Ok(())
    }
}
