//! Rate and comment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDateTime, Utc};

use crate::{
    model::{
        api::ErrorDto,
        rate::{CommentDto, RateDto},
    },
    server::{
        data::{comment::CommentRepository, rate::RateRepository},
        error::Error,
        model::app::AppState,
        util::time::format_relative,
    },
};

/// OpenAPI tag of the rate and comment routes.
pub static RATE_TAG: &str = "rate";

fn rate_dto(rate: entity::smiler_rate::Model, now: NaiveDateTime) -> RateDto {
    RateDto {
        id: rate.id,
        author_id: rate.author_id,
        posted: format_relative(rate.created_at, now),
        title: rate.title,
        text: rate.text,
        rating: rate.rating,
        views: rate.views,
        comments: rate.comments,
        created_at: rate.created_at,
    }
}

fn comment_dto(comment: entity::smiler_comment::Model, now: NaiveDateTime) -> CommentDto {
    CommentDto {
        id: comment.id,
        author_id: comment.author_id,
        rate_id: comment.rate_id,
        posted: format_relative(comment.created_at, now),
        text: comment.text,
        rating: comment.rating,
        created_at: comment.created_at,
    }
}

/// List rates, newest first
#[utoipa::path(
    get,
    path = "/api/rates",
    tag = RATE_TAG,
    responses(
        (status = 200, description = "All rates, newest first", body = Vec<RateDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_rates(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let now = Utc::now().naive_utc();
    let rates = RateRepository::new(&state.db).get_newest().await?;

    let rate_dtos: Vec<RateDto> = rates.into_iter().map(|r| rate_dto(r, now)).collect();

    Ok((StatusCode::OK, Json(rate_dtos)))
}

/// List the comments of a rate, oldest first
#[utoipa::path(
    get,
    path = "/api/rates/{id}/comments",
    tag = RATE_TAG,
    params(("id" = i32, Path, description = "Rate ID")),
    responses(
        (status = 200, description = "Comments of the rate", body = Vec<CommentDto>),
        (status = 404, description = "Rate not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_rate_comments(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let rate = RateRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Rate".to_string()))?;

    let now = Utc::now().naive_utc();
    let comments = CommentRepository::new(&state.db)
        .get_by_rate_id(rate.id)
        .await?;

    let comment_dtos: Vec<CommentDto> =
        comments.into_iter().map(|c| comment_dto(c, now)).collect();

    Ok((StatusCode::OK, Json(comment_dtos)))
}
