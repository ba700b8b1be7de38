//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications. The generated
//! document is served as JSON at `/api/docs/openapi.json`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints.
///
/// # Registered Endpoints
/// - `GET /api/health` - Liveness probe
/// - `GET /api/users` - Users ordered by rating
/// - `GET /api/users/{id}` - Single user
/// - `GET /api/rates` - Rates, newest first
/// - `GET /api/rates/{id}/comments` - Comments of a rate
/// - `POST /api/auth/logout` - Logout current user
/// - `GET /api/docs/openapi.json` - OpenAPI document
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState { db });
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Smiler", description = "Smiler API"), tags(
        (name = controller::health::HEALTH_TAG, description = "Health check routes"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "User API routes"),
        (name = controller::rate::RATE_TAG, description = "Rate and comment API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::health))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::user::get_users))
        .routes(routes!(controller::user::get_user))
        .routes(routes!(controller::rate::get_rates))
        .routes(routes!(controller::rate::get_rate_comments))
        .split_for_parts();

    routes.route(
        "/api/docs/openapi.json",
        get(move || {
            let api = api.clone();
            async move { Json(api) }
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::routes;
    use crate::server::{error::Error, model::app::AppState, util::test::db_test_setup};

    async fn get(path: &str) -> Result<(StatusCode, serde_json::Value), Error> {
        let db = db_test_setup().await?;
        let app = routes().with_state(AppState { db });

        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        Ok((status, serde_json::from_slice(&body).unwrap()))
    }

    #[tokio::test]
    async fn serves_health() -> Result<(), Error> {
        let (status, body) = get("/api/health").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        Ok(())
    }

    #[tokio::test]
    async fn documents_every_api_route() -> Result<(), Error> {
        let (status, body) = get("/api/docs/openapi.json").await?;

        assert_eq!(status, StatusCode::OK);
        for path in [
            "/api/health",
            "/api/auth/logout",
            "/api/users",
            "/api/users/{id}",
            "/api/rates",
            "/api/rates/{id}/comments",
        ] {
            assert!(body["paths"].get(path).is_some(), "{} is not documented", path);
        }

        Ok(())
    }
}
