use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One accepted edit of a game. Field columns are `None` when the edit left
/// that field untouched.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_revisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub relation_id: i32,
    pub user_id: i32,
    pub time_stamp: DateTimeWithTimeZone,
    pub message: String,
    pub title_jp: Option<String>,
    pub title_romaji: Option<String>,
    pub title_english: Option<String>,
    pub title_english_official: Option<bool>,
    pub title_other: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub website: Option<String>,
    pub vndb: Option<String>,
    pub download: Option<String>,
    pub download_alt: Option<String>,
    pub screenshots: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::RelationId",
        to = "super::game::Column::Id"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
