use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::prelude::DateTimeWithTimeZone;

use super::{FieldChange, FieldSet, track};
use crate::entities::{game, game_revision};

/// Editable fields of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFields {
    pub title_jp: String,
    pub title_romaji: String,
    pub title_english: String,
    pub title_english_official: bool,
    pub title_other: String,
    pub description: String,
    pub website: String,
    pub vndb: String,
    pub download: String,
    pub download_alt: String,
    /// Normalised screenshot list, one URL per line.
    pub screenshots: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameChange {
    TitleJp(String),
    TitleRomaji(String),
    TitleEnglish(String),
    TitleEnglishOfficial(bool),
    TitleOther(String),
    Description(String),
    Website(String),
    Vndb(String),
    Download(String),
    DownloadAlt(String),
    Screenshots(String),
}

impl From<&game::Model> for GameFields {
    fn from(game: &game::Model) -> Self {
        Self {
            title_jp: game.title_jp.clone(),
            title_romaji: game.title_romaji.clone(),
            title_english: game.title_english.clone(),
            title_english_official: game.title_english_official,
            title_other: game.title_other.clone(),
            description: game.description.clone(),
            website: game.website.clone(),
            vndb: game.vndb.clone(),
            download: game.download.clone(),
            download_alt: game.download_alt.clone(),
            screenshots: game.screenshots.clone(),
        }
    }
}

impl FieldSet for GameFields {
    type Change = GameChange;

    fn changes_from(&self, previous: Option<&Self>) -> Vec<GameChange> {
        let mut changes = Vec::new();
        track(&mut changes, &self.title_jp, previous.map(|p| &p.title_jp), GameChange::TitleJp);
        track(
            &mut changes,
            &self.title_romaji,
            previous.map(|p| &p.title_romaji),
            GameChange::TitleRomaji,
        );
        track(
            &mut changes,
            &self.title_english,
            previous.map(|p| &p.title_english),
            GameChange::TitleEnglish,
        );
        track(
            &mut changes,
            &self.title_english_official,
            previous.map(|p| &p.title_english_official),
            GameChange::TitleEnglishOfficial,
        );
        track(
            &mut changes,
            &self.title_other,
            previous.map(|p| &p.title_other),
            GameChange::TitleOther,
        );
        track(
            &mut changes,
            &self.description,
            previous.map(|p| &p.description),
            GameChange::Description,
        );
        track(&mut changes, &self.website, previous.map(|p| &p.website), GameChange::Website);
        track(&mut changes, &self.vndb, previous.map(|p| &p.vndb), GameChange::Vndb);
        track(&mut changes, &self.download, previous.map(|p| &p.download), GameChange::Download);
        track(
            &mut changes,
            &self.download_alt,
            previous.map(|p| &p.download_alt),
            GameChange::DownloadAlt,
        );
        track(
            &mut changes,
            &self.screenshots,
            previous.map(|p| &p.screenshots),
            GameChange::Screenshots,
        );
        changes
    }
}

impl GameFields {
    /// A new row for the `games` table.
    #[must_use]
    pub fn into_new_entry(self, now: DateTimeWithTimeZone) -> game::ActiveModel {
        game::ActiveModel {
            id: NotSet,
            title_jp: Set(self.title_jp),
            title_romaji: Set(self.title_romaji),
            title_english: Set(self.title_english),
            title_english_official: Set(self.title_english_official),
            title_other: Set(self.title_other),
            description: Set(self.description),
            website: Set(self.website),
            vndb: Set(self.vndb),
            download: Set(self.download),
            download_alt: Set(self.download_alt),
            screenshots: Set(self.screenshots),
            entry_created: Set(now),
            last_updated: Set(None),
        }
    }
}

impl GameChange {
    /// Write the new value onto the live row.
    pub fn apply(self, entry: &mut game::ActiveModel) {
        match self {
            Self::TitleJp(v) => entry.title_jp = Set(v),
            Self::TitleRomaji(v) => entry.title_romaji = Set(v),
            Self::TitleEnglish(v) => entry.title_english = Set(v),
            Self::TitleEnglishOfficial(v) => entry.title_english_official = Set(v),
            Self::TitleOther(v) => entry.title_other = Set(v),
            Self::Description(v) => entry.description = Set(v),
            Self::Website(v) => entry.website = Set(v),
            Self::Vndb(v) => entry.vndb = Set(v),
            Self::Download(v) => entry.download = Set(v),
            Self::DownloadAlt(v) => entry.download_alt = Set(v),
            Self::Screenshots(v) => entry.screenshots = Set(v),
        }
    }

    fn record(self, row: &mut game_revision::ActiveModel) {
        match self {
            Self::TitleJp(v) => row.title_jp = Set(Some(v)),
            Self::TitleRomaji(v) => row.title_romaji = Set(Some(v)),
            Self::TitleEnglish(v) => row.title_english = Set(Some(v)),
            Self::TitleEnglishOfficial(v) => row.title_english_official = Set(Some(v)),
            Self::TitleOther(v) => row.title_other = Set(Some(v)),
            Self::Description(v) => row.description = Set(Some(v)),
            Self::Website(v) => row.website = Set(Some(v)),
            Self::Vndb(v) => row.vndb = Set(Some(v)),
            Self::Download(v) => row.download = Set(Some(v)),
            Self::DownloadAlt(v) => row.download_alt = Set(Some(v)),
            Self::Screenshots(v) => row.screenshots = Set(Some(v)),
        }
    }

    /// The changes a stored revision recorded.
    #[must_use]
    pub fn recorded_in(revision: &game_revision::Model) -> Vec<Self> {
        let r = revision.clone();
        [
            r.title_jp.map(Self::TitleJp),
            r.title_romaji.map(Self::TitleRomaji),
            r.title_english.map(Self::TitleEnglish),
            r.title_english_official.map(Self::TitleEnglishOfficial),
            r.title_other.map(Self::TitleOther),
            r.description.map(Self::Description),
            r.website.map(Self::Website),
            r.vndb.map(Self::Vndb),
            r.download.map(Self::Download),
            r.download_alt.map(Self::DownloadAlt),
            r.screenshots.map(Self::Screenshots),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl FieldChange for GameChange {
    fn field(&self) -> &'static str {
        match self {
            Self::TitleJp(_) => "title_jp",
            Self::TitleRomaji(_) => "title_romaji",
            Self::TitleEnglish(_) => "title_english",
            Self::TitleEnglishOfficial(_) => "title_english_official",
            Self::TitleOther(_) => "title_other",
            Self::Description(_) => "description",
            Self::Website(_) => "website",
            Self::Vndb(_) => "vndb",
            Self::Download(_) => "download",
            Self::DownloadAlt(_) => "download_alt",
            Self::Screenshots(_) => "screenshots",
        }
    }

    fn value(&self) -> String {
        match self {
            Self::TitleEnglishOfficial(v) => v.to_string(),
            Self::TitleJp(v)
            | Self::TitleRomaji(v)
            | Self::TitleEnglish(v)
            | Self::TitleOther(v)
            | Self::Description(v)
            | Self::Website(v)
            | Self::Vndb(v)
            | Self::Download(v)
            | Self::DownloadAlt(v)
            | Self::Screenshots(v) => v.clone(),
        }
    }
}

/// A `game_revisions` row holding exactly `changes`.
#[must_use]
pub fn revision_row(
    relation_id: i32,
    user_id: i32,
    time_stamp: DateTimeWithTimeZone,
    message: String,
    changes: Vec<GameChange>,
) -> game_revision::ActiveModel {
    let mut row = game_revision::ActiveModel {
        relation_id: Set(relation_id),
        user_id: Set(user_id),
        time_stamp: Set(time_stamp),
        message: Set(message),
        ..Default::default()
    };
    for change in changes {
        change.record(&mut row);
    }
    row
}
