//! JSON models returned by the HTTP API.

pub mod api;
pub mod rate;
pub mod user;
