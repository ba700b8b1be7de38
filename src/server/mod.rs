//! Server application core modules.
//!
//! This module contains the backend of the Smiler application: configuration, HTTP routing,
//! controllers, database repositories and the startup routine used both by the binary and by
//! the integration test harness.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod startup;
pub mod util;
