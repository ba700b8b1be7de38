//! Database repositories.
//!
//! Thin query wrappers over the sea-orm entities. Each repository borrows any
//! `ConnectionTrait` so it works with pooled connections and transactions alike.

pub mod comment;
pub mod rate;
pub mod user;
