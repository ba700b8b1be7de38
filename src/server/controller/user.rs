//! User endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDateTime, Utc};

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        data::user::UserRepository,
        error::Error,
        model::app::AppState,
        util::{avatar::resolve_avatar, time::format_relative},
    },
};

/// OpenAPI tag of the user routes.
pub static USER_TAG: &str = "user";

/// Converts a user model into its public representation
pub fn user_dto(user: entity::smiler_user::Model, now: NaiveDateTime) -> UserDto {
    UserDto {
        id: user.id,
        avatar: resolve_avatar(Some(user.avatar.as_str())),
        joined: format_relative(user.created_at, now),
        login: user.login,
        rating: user.rating,
        display_name: user.display_name,
        about: user.about,
        created_at: user.created_at,
    }
}

/// List users, highest rating first
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users ordered by rating", body = Vec<UserDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let now = Utc::now().naive_utc();
    let users = UserRepository::new(&state.db).get_all_by_rating().await?;

    let user_dtos: Vec<UserDto> = users.into_iter().map(|u| user_dto(u, now)).collect();

    Ok((StatusCode::OK, Json(user_dtos)))
}

/// Get a single user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = UserRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("User".to_string()))?;

    Ok((StatusCode::OK, Json(user_dto(user, Utc::now().naive_utc()))))
}
