//! Factory for randomized rate records.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use entity::smiler_rate;
use sea_orm::{ActiveValue, IntoActiveModel};

use crate::fixtures::{
    merge::{merge_field, Merge},
    token::unique_token,
};

/// In-memory rate record.
///
/// `author_id` defaults to `1`; override it with a persisted user's id, or use
/// `ctx.rate().insert_with_author(..)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateFixture {
    pub author_id: i32,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub stats: RateStats,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateStats {
    pub views: i32,
    pub comments: i32,
}

#[derive(Debug, Clone, Default)]
pub struct RateOverrides {
    pub author_id: Option<i32>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub rating: Option<i32>,
    pub stats: Option<RateStatsOverrides>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct RateStatsOverrides {
    pub views: Option<i32>,
    pub comments: Option<i32>,
}

/// Generate an unrated, unviewed rate by user `1` with a unique title, then apply
/// `overrides` on top.
pub fn generate(overrides: Option<RateOverrides>) -> RateFixture {
    let token = unique_token();

    let mut rate = RateFixture {
        author_id: 1,
        title: format!("Rate {}", token),
        text: format!("Generated rate text {}", token),
        rating: 0,
        stats: RateStats {
            views: 0,
            comments: 0,
        },
        created_at: Utc::now().naive_utc().trunc_subsecs(6),
    };
    merge_field(&mut rate, overrides);

    rate
}

impl Merge for RateFixture {
    type Overrides = RateOverrides;

    fn merge(&mut self, overrides: Self::Overrides) {
        merge_field(&mut self.author_id, overrides.author_id);
        merge_field(&mut self.title, overrides.title);
        merge_field(&mut self.text, overrides.text);
        merge_field(&mut self.rating, overrides.rating);
        merge_field(&mut self.stats, overrides.stats);
        merge_field(&mut self.created_at, overrides.created_at);
    }
}

impl Merge for RateStats {
    type Overrides = RateStatsOverrides;

    fn merge(&mut self, overrides: Self::Overrides) {
        merge_field(&mut self.views, overrides.views);
        merge_field(&mut self.comments, overrides.comments);
    }
}

impl IntoActiveModel<smiler_rate::ActiveModel> for RateFixture {
    fn into_active_model(self) -> smiler_rate::ActiveModel {
        smiler_rate::ActiveModel {
            id: ActiveValue::NotSet,
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            text: ActiveValue::Set(self.text),
            rating: ActiveValue::Set(self.rating),
            views: ActiveValue::Set(self.stats.views),
            comments: ActiveValue::Set(self.stats.comments),
            created_at: ActiveValue::Set(self.created_at),
        }
    }
}

impl From<smiler_rate::Model> for RateFixture {
    fn from(model: smiler_rate::Model) -> Self {
        Self {
            author_id: model.author_id,
            title: model.title,
            text: model.text,
            rating: model.rating,
            stats: RateStats {
                views: model.views,
                comments: model.comments,
            },
            created_at: model.created_at,
        }
    }
}
