use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

/// Which kind of entry a revision belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Game,
    Release,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedField {
    pub field: &'static str,
    pub value: String,
}

/// A revision as shown in history listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionEntry {
    pub id: i32,
    pub kind: EntryKind,
    pub relation_id: i32,
    pub username: String,
    pub time_stamp: DateTimeWithTimeZone,
    pub message: String,
    pub changes: Vec<ChangedField>,
}

#[derive(Debug, Serialize)]
pub struct RevisionsPage {
    pub revisions: Vec<RevisionEntry>,
}
