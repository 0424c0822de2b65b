use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::prelude::DateTimeWithTimeZone;

use super::{FieldChange, FieldSet, track};
use crate::entities::{release, release_revision};

/// Editable fields of a release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseFields {
    pub title: String,
    pub platform: String,
    pub publisher: String,
    pub version: String,
    pub release_date: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseChange {
    Title(String),
    Platform(String),
    Publisher(String),
    Version(String),
    ReleaseDate(String),
    Notes(String),
}

impl From<&release::Model> for ReleaseFields {
    fn from(release: &release::Model) -> Self {
        Self {
            title: release.title.clone(),
            platform: release.platform.clone(),
            publisher: release.publisher.clone(),
            version: release.version.clone(),
            release_date: release.release_date.clone(),
            notes: release.notes.clone(),
        }
    }
}

impl FieldSet for ReleaseFields {
    type Change = ReleaseChange;

    fn changes_from(&self, previous: Option<&Self>) -> Vec<ReleaseChange> {
        let mut changes = Vec::new();
        track(&mut changes, &self.title, previous.map(|p| &p.title), ReleaseChange::Title);
        track(&mut changes, &self.platform, previous.map(|p| &p.platform), ReleaseChange::Platform);
        track(
            &mut changes,
            &self.publisher,
            previous.map(|p| &p.publisher),
            ReleaseChange::Publisher,
        );
        track(&mut changes, &self.version, previous.map(|p| &p.version), ReleaseChange::Version);
        track(
            &mut changes,
            &self.release_date,
            previous.map(|p| &p.release_date),
            ReleaseChange::ReleaseDate,
        );
        track(&mut changes, &self.notes, previous.map(|p| &p.notes), ReleaseChange::Notes);
        changes
    }
}

impl ReleaseFields {
    #[must_use]
    pub fn into_new_entry(self, game_id: i32, now: DateTimeWithTimeZone) -> release::ActiveModel {
        release::ActiveModel {
            id: NotSet,
            game_id: Set(game_id),
            title: Set(self.title),
            platform: Set(self.platform),
            publisher: Set(self.publisher),
            version: Set(self.version),
            release_date: Set(self.release_date),
            notes: Set(self.notes),
            entry_created: Set(now),
            last_updated: Set(None),
        }
    }
}

impl ReleaseChange {
    pub fn apply(self, entry: &mut release::ActiveModel) {
        match self {
            Self::Title(v) => entry.title = Set(v),
            Self::Platform(v) => entry.platform = Set(v),
            Self::Publisher(v) => entry.publisher = Set(v),
            Self::Version(v) => entry.version = Set(v),
            Self::ReleaseDate(v) => entry.release_date = Set(v),
            Self::Notes(v) => entry.notes = Set(v),
        }
    }

    fn record(self, row: &mut release_revision::ActiveModel) {
        match self {
            Self::Title(v) => row.title = Set(Some(v)),
            Self::Platform(v) => row.platform = Set(Some(v)),
            Self::Publisher(v) => row.publisher = Set(Some(v)),
            Self::Version(v) => row.version = Set(Some(v)),
            Self::ReleaseDate(v) => row.release_date = Set(Some(v)),
            Self::Notes(v) => row.notes = Set(Some(v)),
        }
    }

    #[must_use]
    pub fn recorded_in(revision: &release_revision::Model) -> Vec<Self> {
        let r = revision.clone();
        [
            r.title.map(Self::Title),
            r.platform.map(Self::Platform),
            r.publisher.map(Self::Publisher),
            r.version.map(Self::Version),
            r.release_date.map(Self::ReleaseDate),
            r.notes.map(Self::Notes),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl FieldChange for ReleaseChange {
    fn field(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Platform(_) => "platform",
            Self::Publisher(_) => "publisher",
            Self::Version(_) => "version",
            Self::ReleaseDate(_) => "release_date",
            Self::Notes(_) => "notes",
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Title(v)
            | Self::Platform(v)
            | Self::Publisher(v)
            | Self::Version(v)
            | Self::ReleaseDate(v)
            | Self::Notes(v) => v.clone(),
        }
    }
}

/// A `release_revisions` row holding exactly `changes`.
#[must_use]
pub fn revision_row(
    relation_id: i32,
    user_id: i32,
    time_stamp: DateTimeWithTimeZone,
    message: String,
    changes: Vec<ReleaseChange>,
) -> release_revision::ActiveModel {
    let mut row = release_revision::ActiveModel {
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
