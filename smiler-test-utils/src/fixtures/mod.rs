//! Test fixture modules.
//!
//! Each record kind has a pure `factory` submodule producing randomized, schema-valid
//! in-memory records with typed overrides, and persistence helpers on [`TestContext`]
//! (`ctx.user()`, `ctx.rate()`, `ctx.comment()`) that write them to the test database.
//!
//! - `user` - Smiler user accounts with nested profile and notification settings
//! - `rate` - Posted rates with nested view/comment counters
//! - `comment` - Comments on rates
//!
//! [`TestContext`]: crate::TestContext

pub mod comment;
pub mod merge;
pub mod rate;
pub mod token;
pub mod user;
