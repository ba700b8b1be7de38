//! Factory for randomized user records.
//!
//! Pure functions: nothing here touches the database. Persist the result with
//! `ctx.user().insert(..)` or convert it with [`IntoActiveModel`].

use chrono::{NaiveDateTime, SubsecRound, Utc};
use entity::smiler_user;
use sea_orm::{ActiveValue, IntoActiveModel};
use smiler::server::util::avatar::DEFAULT_AVATAR;

use crate::fixtures::{
    merge::{merge_field, Merge},
    token::{random_hex, unique_token},
};

/// In-memory user record.
///
/// `login` and `email` carry a uniqueness token; `profile` is stored flattened in the
/// `smiler_user` table.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFixture {
    pub login: String,
    pub email: String,
    pub avatar: String,
    pub salt: String,
    pub hash: String,
    pub rating: i32,
    pub profile: UserProfile,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub display_name: String,
    pub about: String,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSettings {
    pub email: bool,
    pub replies: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserOverrides {
    pub login: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub salt: Option<String>,
    pub hash: Option<String>,
    pub rating: Option<i32>,
    pub profile: Option<ProfileOverrides>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileOverrides {
    pub display_name: Option<String>,
    pub about: Option<String>,
    pub notifications: Option<NotificationOverrides>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationOverrides {
    pub email: Option<bool>,
    pub replies: Option<bool>,
}

/// Generate a user with random credentials, zero rating and default profile, then apply
/// `overrides` on top.
///
/// ```ignore
/// let user = generate(Some(UserOverrides {
///     rating: Some(5),
///     ..Default::default()
/// }));
/// ```
pub fn generate(overrides: Option<UserOverrides>) -> UserFixture {
    let token = unique_token();
    let login = format!("user_{}", token);

    let mut user = UserFixture {
        email: format!("{}@smiler.test", login),
        login,
        avatar: DEFAULT_AVATAR.to_string(),
        salt: random_hex(16),
        hash: random_hex(32),
        rating: 0,
        profile: UserProfile {
            display_name: format!("User {}", token),
            about: "Generated test user".to_string(),
            notifications: NotificationSettings {
                email: true,
                replies: true,
            },
        },
        // Databases store microseconds at most
        created_at: Utc::now().naive_utc().trunc_subsecs(6),
    };
    merge_field(&mut user, overrides);

    user
}

impl Merge for UserFixture {
    type Overrides = UserOverrides;

    fn merge(&mut self, overrides: Self::Overrides) {
        merge_field(&mut self.login, overrides.login);
        merge_field(&mut self.email, overrides.email);
        merge_field(&mut self.avatar, overrides.avatar);
        merge_field(&mut self.salt, overrides.salt);
        merge_field(&mut self.hash, overrides.hash);
        merge_field(&mut self.rating, overrides.rating);
        merge_field(&mut self.profile, overrides.profile);
        merge_field(&mut self.created_at, overrides.created_at);
    }
}

impl Merge for UserProfile {
    type Overrides = ProfileOverrides;

    fn merge(&mut self, overrides: Self::Overrides) {
        merge_field(&mut self.display_name, overrides.display_name);
        merge_field(&mut self.about, overrides.about);
        merge_field(&mut self.notifications, overrides.notifications);
    }
}

impl Merge for NotificationSettings {
    type Overrides = NotificationOverrides;

    fn merge(&mut self, overrides: Self::Overrides) {
        merge_field(&mut self.email, overrides.email);
        merge_field(&mut self.replies, overrides.replies);
    }
}

impl IntoActiveModel<smiler_user::ActiveModel> for UserFixture {
    fn into_active_model(self) -> smiler_user::ActiveModel {
        smiler_user::ActiveModel {
            id: ActiveValue::NotSet,
            login: ActiveValue::Set(self.login),
            email: ActiveValue::Set(self.email),
            avatar: ActiveValue::Set(self.avatar),
            salt: ActiveValue::Set(self.salt),
            hash: ActiveValue::Set(self.hash),
            rating: ActiveValue::Set(self.rating),
            display_name: ActiveValue::Set(self.profile.display_name),
            about: ActiveValue::Set(self.profile.about),
            notify_email: ActiveValue::Set(self.profile.notifications.email),
            notify_replies: ActiveValue::Set(self.profile.notifications.replies),
            created_at: ActiveValue::Set(self.created_at),
        }
    }
}

impl From<smiler_user::Model> for UserFixture {
    fn from(model: smiler_user::Model) -> Self {
        Self {
            login: model.login,
            email: model.email,
            avatar: model.avatar,
            salt: model.salt,
            hash: model.hash,
            rating: model.rating,
            profile: UserProfile {
                display_name: model.display_name,
                about: model.about,
                notifications: NotificationSettings {
                    email: model.notify_email,
                    replies: model.notify_replies,
                },
            },
            created_at: model.created_at,
        }
    }
}
