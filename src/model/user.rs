use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public view of a user; credentials are never serialized.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub login: String,
    /// Avatar URL, falls back to the default avatar when the user has none
    pub avatar: String,
    pub rating: i32,
    pub display_name: String,
    pub about: String,
    pub created_at: NaiveDateTime,
    /// Relative registration time, e.g. "3 days ago"
    pub joined: String,
}
