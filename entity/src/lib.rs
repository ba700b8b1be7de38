//! sea-orm entities for the Smiler database schema.

pub mod prelude;

pub mod smiler_comment;
pub mod smiler_rate;
pub mod smiler_user;
