//! Session data models and utilities.
//!
//! Type-safe wrappers around tower-sessions entries.

pub mod user;
