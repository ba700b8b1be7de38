//! Server application models.
//!
//! Application state shared with handlers and typed session entries.

pub mod app;
pub mod session;
