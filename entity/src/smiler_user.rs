use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "smiler_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login: String,
    #[sea_orm(unique)]
    pub email: String,
    pub avatar: String,
    pub salt: String,
    pub hash: String,
    pub rating: i32,
    pub display_name: String,
    #[sea_orm(column_type = "Text")]
    pub about: String,
    pub notify_email: bool,
    pub notify_replies: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::smiler_rate::Entity")]
    SmilerRate,
    #[sea_orm(has_many = "super::smiler_comment::Entity")]
    SmilerComment,
}

impl Related<super::smiler_rate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmilerRate.def()
    }
}

impl Related<super::smiler_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmilerComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
