//! Avatar fallback resolution.

/// Avatar served for users that never uploaded one.
pub const DEFAULT_AVATAR: &str = "/static/images/default-avatar.png";

/// Returns the user's avatar, or [`DEFAULT_AVATAR`] when it is missing or blank.
pub fn resolve_avatar(avatar: Option<&str>) -> String {
    match avatar.map(str::trim) {
        Some(avatar) if !avatar.is_empty() => avatar.to_string(),
        _ => DEFAULT_AVATAR.to_string(),
    }
}
