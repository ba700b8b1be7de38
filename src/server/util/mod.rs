//! Utility functions shared by controllers.
//!
//! Presentation helpers applied when models are turned into API responses: avatar fallback
//! resolution and relative time formatting.

pub mod avatar;
pub mod time;

#[cfg(test)]
pub mod test;
