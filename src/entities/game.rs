use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title_jp: String,
    pub title_romaji: String,
    pub title_english: String,
    pub title_english_official: bool,
    pub title_other: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub website: String,
    pub vndb: String,
    pub download: String,
    pub download_alt: String,
    pub screenshots: String,
    pub entry_created: DateTimeWithTimeZone,
    pub last_updated: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// The title shown in the window: romaji, then Japanese, then English.
    #[must_use]
    pub fn display_title(&self) -> &str {
        [&self.title_romaji, &self.title_jp, &self.title_english]
            .into_iter()
            .find(|t| !t.is_empty())
            .map_or("", String::as_str)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::release::Entity")]
    Releases,
    #[sea_orm(has_many = "super::game_revision::Entity")]
    Revisions,
    #[sea_orm(has_many = "super::screenshot::Entity")]
    Screenshots,
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::release::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Releases.def()
    }
}

impl Related<super::game_revision::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Revisions.def()
    }
}

impl Related<super::screenshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Screenshots.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
