//! HTTP controller endpoints for the Smiler web API.
//!
//! Axum handlers for health checks, users, rates with their comments, and session logout.
//! Every handler is annotated with a utoipa path so it shows up in the OpenAPI document.

pub mod auth;
pub mod health;
pub mod rate;
pub mod user;
