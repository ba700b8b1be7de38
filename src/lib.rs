//! Smiler backend library.
//!
//! Exposes the HTTP server, its configuration and the JSON models shared with clients. The
//! binary in `main.rs` and the integration harness in `smiler-test-utils` both start the
//! application through [`server::startup::start_app`].

pub mod model;
pub mod server;
