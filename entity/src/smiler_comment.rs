use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "smiler_comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub rate_id: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub rating: i32,
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
    #[sea_orm(
        belongs_to = "super::smiler_rate::Entity",
        from = "Column::RateId",
        to = "super::smiler_rate::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SmilerRate,
}

impl Related<super::smiler_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmilerUser.def()
    }
}

impl Related<super::smiler_rate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmilerRate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
