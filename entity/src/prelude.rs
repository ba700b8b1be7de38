pub use super::smiler_comment::Entity as SmilerComment;
pub use super::smiler_rate::Entity as SmilerRate;
pub use super::smiler_user::Entity as SmilerUser;
