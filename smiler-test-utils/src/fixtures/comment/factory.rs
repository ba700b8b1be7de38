//! Factory for randomized comment records.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use entity::smiler_comment;
use sea_orm::{ActiveValue, IntoActiveModel};

use crate::fixtures::{
    merge::{merge_field, Merge},
    token::unique_token,
};

/// In-memory comment record. `author_id` and `rate_id` default to `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentFixture {
    pub author_id: i32,
    pub rate_id: i32,
    pub text: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct CommentOverrides {
    pub author_id: Option<i32>,
    pub rate_id: Option<i32>,
    pub text: Option<String>,
    pub rating: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
}

/// Generate an unrated comment by user `1` on rate `1` with unique text, then apply
/// `overrides` on top.
pub fn generate(overrides: Option<CommentOverrides>) -> CommentFixture {
    let mut comment = CommentFixture {
        author_id: 1,
        rate_id: 1,
        text: format!("Comment {}", unique_token()),
        rating: 0,
        created_at: Utc::now().naive_utc().trunc_subsecs(6),
    };
    merge_field(&mut comment, overrides);

    comment
}

impl Merge for CommentFixture {
    type Overrides = CommentOverrides;

    fn merge(&mut self, overrides: Self::Overrides) {
        merge_field(&mut self.author_id, overrides.author_id);
        merge_field(&mut self.rate_id, overrides.rate_id);
        merge_field(&mut self.text, overrides.text);
        merge_field(&mut self.rating, overrides.rating);
        merge_field(&mut self.created_at, overrides.created_at);
    }
}

impl IntoActiveModel<smiler_comment::ActiveModel> for CommentFixture {
    fn into_active_model(self) -> smiler_comment::ActiveModel {
        smiler_comment::ActiveModel {
            id: ActiveValue::NotSet,
            author_id: ActiveValue::Set(self.author_id),
            rate_id: ActiveValue::Set(self.rate_id),
            text: ActiveValue::Set(self.text),
            rating: ActiveValue::Set(self.rating),
            created_at: ActiveValue::Set(self.created_at),
        }
    }
}

impl From<smiler_comment::Model> for CommentFixture {
    fn from(model: smiler_comment::Model) -> Self {
        Self {
            author_id: model.author_id,
            rate_id: model.rate_id,
            text: model.text,
            rating: model.rating,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_comment_has_every_field() {
        let comment = generate(None);

        assert_eq!(comment.author_id, 1);
        assert_eq!(comment.rate_id, 1);
        assert!(comment.text.starts_with("Comment "));
        assert_eq!(comment.rating, 0);
    }

    #[test]
    fn overrides_replace_only_named_fields() {
        let mut comment = generate(None);
        let mut expected = comment.clone();
        expected.rate_id = 9;
        expected.rating = -1;

        comment.merge(CommentOverrides {
            rate_id: Some(9),
            rating: Some(-1),
            ..Default::default()
        });

        assert_eq!(comment, expected);
    }

    #[test]
    fn successive_comments_do_not_collide() {
        assert_ne!(generate(None).text, generate(None).text);
    }
}
