//! Field-level edit history.
//!
//! The editable fields of an entry form a [`FieldSet`]. Diffing a submission
//! against the stored snapshot yields typed changes, one enum variant per
//! field, and only those changes become columns of the revision row. An edit
//! that changes nothing produces no row at all.

pub mod game;
pub mod release;

use chrono::{SubsecRound, Utc};
use sea_orm::DbErr;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::dto::revision::ChangedField;

/// A value that can be diffed. Blank values are left out of a new entry's
/// first revision.
pub trait Tracked: PartialEq + Clone {
    fn is_blank(&self) -> bool;
}

impl Tracked for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Tracked for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

/// Push `wrap(new)` when `new` differs from `old`, or, with no `old`, when
/// `new` is not blank.
pub fn track<T: Tracked, C>(changes: &mut Vec<C>, new: &T, old: Option<&T>, wrap: fn(T) -> C) {
    let changed = old.map_or_else(|| !new.is_blank(), |old| old != new);
    if changed {
        changes.push(wrap(new.clone()));
    }
}

/// One changed field of a revision.
pub trait FieldChange: Clone {
    /// Column name of the field.
    fn field(&self) -> &'static str;
    /// The new value as text.
    fn value(&self) -> String;

    fn describe(&self) -> ChangedField {
        ChangedField {
            field: self.field(),
            value: self.value(),
        }
    }
}

/// The editable, revisioned fields of one entry kind.
pub trait FieldSet {
    type Change: FieldChange;

    /// Changes in field declaration order. `previous` is `None` for new entries.
    fn changes_from(&self, previous: Option<&Self>) -> Vec<Self::Change>;
}

/// Why a save did not go through.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("no entry with id {0}")]
    NotFound(i32),
    #[error("submission matches the stored entry")]
    NoEffectiveChange,
    #[error("database error: {0}")]
    Persistence(#[from] DbErr),
}

/// Result of a save that wrote a revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub id: i32,
    pub revision_id: i32,
    pub time_stamp: DateTimeWithTimeZone,
}

/// The current time at the precision the database stores.
#[must_use]
pub fn timestamp() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Probe {
        Text(String),
        Flag(bool),
    }

    #[test]
    fn test_new_entries_skip_blank_values() {
        let mut changes = Vec::new();
        track(&mut changes, &String::new(), None, Probe::Text);
        track(&mut changes, &false, None, Probe::Flag);
        assert!(changes.is_empty());

        track(&mut changes, &"Foo".to_string(), None, Probe::Text);
        track(&mut changes, &true, None, Probe::Flag);
        assert_eq!(
            changes,
            vec![Probe::Text("Foo".to_string()), Probe::Flag(true)]
        );
    }

    #[test]
    fn test_edits_record_only_differences() {
        let old = "Foo".to_string();
        let mut changes = Vec::new();
        track(&mut changes, &"Foo".to_string(), Some(&old), Probe::Text);
        assert!(changes.is_empty());

        // Clearing a field is a change
        track(&mut changes, &String::new(), Some(&old), Probe::Text);
        track(&mut changes, &false, Some(&true), Probe::Flag);
        assert_eq!(
            changes,
            vec![Probe::Text(String::new()), Probe::Flag(false)]
        );
    }

    #[test]
    fn test_timestamp_has_microsecond_precision() {
        let now = timestamp();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
    }
}
