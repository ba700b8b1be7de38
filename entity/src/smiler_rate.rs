use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "smiler_rate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub rating: i32,
    pub views: i32,
    pub comments: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::smiler_user::Entity",
        from = "Column::AuthorId",
        to = "super::smiler_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SmilerUser,
    #[sea_orm(has_many = "super::smiler_comment::Entity")]
    SmilerComment,
}

impl Related<super::smiler_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmilerUser.def()
    }
}

impl Related<super::smiler_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmilerComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
