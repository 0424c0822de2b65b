use std::collections::BTreeMap;

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::entities::{game, release};

/// Body of `POST /game/new` and `POST /game/edit/{id}`, echoed back when
/// validation fails.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameForm {
    pub title_jp: String,
    pub title_romaji: String,
    pub title_english: String,
    /// Checkbox: present when ticked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_english_official: Option<String>,
    pub title_other: String,
    pub description: String,
    pub website: String,
    pub vndb: String,
    pub download: String,
    pub download_alt: String,
    /// One URL per line.
    pub screenshots: String,
    pub message: String,
}

impl GameForm {
    #[must_use]
    pub const fn english_title_is_official(&self) -> bool {
        self.title_english_official.is_some()
    }

    /// The edit form for a stored game. Screenshots come from the game's own
    /// normalised text so an untouched resubmission diffs as empty.
    #[must_use]
    pub fn prefill(game: &game::Model) -> Self {
        Self {
            title_jp: game.title_jp.clone(),
            title_romaji: game.title_romaji.clone(),
            title_english: game.title_english.clone(),
            title_english_official: game.title_english_official.then(|| "on".to_string()),
            title_other: game.title_other.clone(),
            description: game.description.clone(),
            website: game.website.clone(),
            vndb: game.vndb.clone(),
            download: game.download.clone(),
            download_alt: game.download_alt.clone(),
            screenshots: game.screenshots.clone(),
            message: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFormPage {
    pub form: GameForm,
    pub form_action: String,
    pub editing: bool,
}

/// Query string of `GET /game/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub s: Option<String>,
    pub o: Option<String>,
}

/// One line of the game list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameListRow {
    pub id: i32,
    pub title_jp: String,
    pub title_romaji: String,
    pub title_english: String,
    pub rating_bayesian: Option<f64>,
    pub ratings: i64,
}

#[derive(Debug, Serialize)]
pub struct SortState {
    pub column: &'static str,
    pub direction: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListPage {
    pub games: Vec<GameListRow>,
    pub sort: SortState,
    /// Column name to the link that sorts by it.
    pub sort_urls: BTreeMap<&'static str, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRating {
    pub username: String,
    pub rating: f64,
    pub time_stamp: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReview {
    pub username: String,
    pub review: String,
    pub time_stamp: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameViewPage {
    pub game: game::Model,
    pub screenshots: Vec<String>,
    pub releases: Vec<release::Model>,
    pub rating_count: i64,
    pub rating_average: Option<f64>,
    pub rating_bayesian: Option<f64>,
    /// The viewer's own rating, when logged in and rated.
    pub user_rating: Option<f64>,
    pub ratings_recent: Vec<RecentRating>,
    pub reviews_recent: Vec<RecentReview>,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub games: Vec<game::Model>,
}
