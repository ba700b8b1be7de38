use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RateDto {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub views: i32,
    pub comments: i32,
    pub created_at: NaiveDateTime,
    /// Relative posting time, e.g. "5 minutes ago"
    pub posted: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub author_id: i32,
    pub rate_id: i32,
    pub text: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
    pub posted: String,
}
