use std::cmp::Reverse;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::dto::revision::{EntryKind, RevisionEntry};
use crate::entities::{game_revision, release_revision, user};
use crate::revision::FieldChange;
use crate::revision::game::GameChange;
use crate::revision::release::ReleaseChange;

/// How many revisions the site-wide history shows.
pub const RECENT_REVISIONS: u64 = 50;

fn game_entry(revision: &game_revision::Model, author: Option<user::Model>) -> RevisionEntry {
    RevisionEntry {
        id: revision.id,
        kind: EntryKind::Game,
        relation_id: revision.relation_id,
        username: author.map(|u| u.username).unwrap_or_default(),
        time_stamp: revision.time_stamp,
        message: revision.message.clone(),
        changes: GameChange::recorded_in(revision)
            .iter()
            .map(FieldChange::describe)
            .collect(),
    }
}

fn release_entry(
    revision: &release_revision::Model,
    author: Option<user::Model>,
) -> RevisionEntry {
    RevisionEntry {
        id: revision.id,
        kind: EntryKind::Release,
        relation_id: revision.relation_id,
        username: author.map(|u| u.username).unwrap_or_default(),
        time_stamp: revision.time_stamp,
        message: revision.message.clone(),
        changes: ReleaseChange::recorded_in(revision)
            .iter()
            .map(FieldChange::describe)
            .collect(),
    }
}

pub struct RevisionService;

impl RevisionService {
    /// History of one game, newest first.
    pub async fn for_game<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
    ) -> Result<Vec<RevisionEntry>, DbErr> {
        Ok(game_revision::Entity::find()
            .find_also_related(user::Entity)
            .filter(game_revision::Column::RelationId.eq(game_id))
            .order_by_desc(game_revision::Column::TimeStamp)
            .order_by_desc(game_revision::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(|(revision, author)| game_entry(&revision, author))
            .collect())
    }

    /// History of one release, newest first.
    pub async fn for_release<C: ConnectionTrait>(
        conn: &C,
        release_id: i32,
    ) -> Result<Vec<RevisionEntry>, DbErr> {
        Ok(release_revision::Entity::find()
            .find_also_related(user::Entity)
            .filter(release_revision::Column::RelationId.eq(release_id))
            .order_by_desc(release_revision::Column::TimeStamp)
            .order_by_desc(release_revision::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(|(revision, author)| release_entry(&revision, author))
            .collect())
    }

    /// The most recent revisions across games and releases, newest first.
    pub async fn recent<C: ConnectionTrait>(conn: &C) -> Result<Vec<RevisionEntry>, DbErr> {
        let games = game_revision::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(game_revision::Column::TimeStamp)
            .order_by_desc(game_revision::Column::Id)
            .limit(RECENT_REVISIONS)
            .all(conn)
            .await?;
        let releases = release_revision::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(release_revision::Column::TimeStamp)
            .order_by_desc(release_revision::Column::Id)
            .limit(RECENT_REVISIONS)
            .all(conn)
            .await?;

        let mut entries: Vec<RevisionEntry> = games
            .into_iter()
            .map(|(revision, author)| game_entry(&revision, author))
            .chain(
                releases
                    .into_iter()
                    .map(|(revision, author)| release_entry(&revision, author)),
            )
            .collect();
        entries.sort_by_key(|e| Reverse((e.time_stamp, e.id)));
        #[allow(clippy::cast_possible_truncation)]
        entries.truncate(RECENT_REVISIONS as usize);
        Ok(entries)
    }
}
