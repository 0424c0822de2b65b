use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::entities::{game, release};
use crate::revision::release::{ReleaseFields, revision_row};
use crate::revision::{CommitError, CommitOutcome, FieldChange, FieldSet, timestamp};
use crate::validation::release::ReleaseSubmission;

/// What a release save applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// A new release of the given game.
    New { game_id: i32 },
    /// An existing release.
    Existing(i32),
}

pub struct ReleaseService;

impl ReleaseService {
    /// Create or edit a release, recording a revision of the changed fields.
    ///
    /// Runs in one transaction; see [`GameService::save`] for the rules.
    ///
    /// [`GameService::save`]: crate::services::game_service::GameService::save
    pub async fn save(
        db: &DatabaseConnection,
        target: ReleaseTarget,
        submission: ReleaseSubmission,
        author_id: i32,
    ) -> Result<CommitOutcome, CommitError> {
        let ReleaseSubmission { fields, message } = submission;

        let now = timestamp();
        let txn = db.begin().await?;

        let previous = match target {
            ReleaseTarget::Existing(id) => Some(
                Self::find_for_update(&txn, id)
                    .await?
                    .ok_or(CommitError::NotFound(id))?,
            ),
            ReleaseTarget::New { game_id } => {
                if game::Entity::find_by_id(game_id).one(&txn).await?.is_none() {
                    return Err(CommitError::NotFound(game_id));
                }
                None
            }
        };
        let stored = previous.as_ref().map(ReleaseFields::from);

        let changes = fields.changes_from(stored.as_ref());
        if changes.is_empty() {
            txn.rollback().await?;
            return Err(CommitError::NoEffectiveChange);
        }
        let changed: Vec<&str> = changes.iter().map(FieldChange::field).collect();

        let entry = match (previous, target) {
            (Some(previous), _) => {
                let mut entry: release::ActiveModel = previous.into();
                for change in changes.iter().cloned() {
                    change.apply(&mut entry);
                }
                entry.last_updated = Set(Some(now));
                entry.update(&txn).await?
            }
            (None, ReleaseTarget::New { game_id }) => {
                fields.into_new_entry(game_id, now).insert(&txn).await?
            }
            (None, ReleaseTarget::Existing(id)) => return Err(CommitError::NotFound(id)),
        };

        let revision = revision_row(entry.id, author_id, now, message, changes)
            .insert(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(
            release_id = entry.id,
            game_id = entry.game_id,
            revision_id = revision.id,
            author_id,
            ?changed,
            "Release saved"
        );

        Ok(CommitOutcome {
            id: entry.id,
            revision_id: revision.id,
            time_stamp: now,
        })
    }

    async fn find_for_update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Option<release::Model>, DbErr> {
        let mut query = release::Entity::find_by_id(id);
        if conn.get_database_backend() == DbBackend::Postgres {
            query = query.lock_exclusive();
        }
        query.one(conn).await
    }

    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Option<release::Model>, DbErr> {
        release::Entity::find_by_id(id).one(conn).await
    }

    /// Releases of a game, oldest entry first.
    pub async fn for_game<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
    ) -> Result<Vec<release::Model>, DbErr> {
        release::Entity::find()
            .filter(release::Column::GameId.eq(game_id))
            .order_by_asc(release::Column::Id)
            .all(conn)
            .await
    }
}
