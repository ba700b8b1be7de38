use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Liveness response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
