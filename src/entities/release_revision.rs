use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One accepted edit of a release.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "release_revisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub relation_id: i32,
    pub user_id: i32,
    pub time_stamp: DateTimeWithTimeZone,
    pub message: String,
    pub title: Option<String>,
    pub platform: Option<String>,
    pub publisher: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::release::Entity",
        from = "Column::RelationId",
        to = "super::release::Column::Id"
    )]
    Release,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::release::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Release.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
