//! Error types for the Smiler server application.
//!
//! All errors use `thiserror` and implement `IntoResponse` so handlers can return
//! `Result<_, Error>` and rely on `?` for propagation.

pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::config::ConfigError};

/// Main error type for the Smiler server application.
///
/// Aggregates configuration errors and external library errors into a single type. The
/// `IntoResponse` implementation maps [`Error::NotFound`] to 404 and everything else to a
/// logged 500 response.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Requested resource does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug or a crashed background task.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Socket error while binding or serving the HTTP listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::NotFound(resource) => {
                tracing::debug!(resource = %resource, "Resource not found");

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: format!("{} not found", resource),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client so implementation
/// details never leak.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
