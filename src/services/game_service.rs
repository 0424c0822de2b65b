use std::cmp::Ordering;

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    QueryOrder, QuerySelect, TransactionTrait,
};

use crate::dto::game::{GameListRow, GameViewPage};
use crate::entities::game;
use crate::revision::game::{GameFields, revision_row};
use crate::revision::{CommitError, CommitOutcome, FieldChange, FieldSet, timestamp};
use crate::services::rating_service::RatingService;
use crate::services::release_service::ReleaseService;
use crate::services::screenshot_service::ScreenshotService;
use crate::utils::sort::{SortColumn, SortOrder, nulls_last};
use crate::validation::game::GameSubmission;

/// How many games the home page lists.
pub const RECENT_GAMES: u64 = 10;

pub struct GameService;

impl GameService {
    /// Create a game (`target` is `None`) or edit one, recording a revision of
    /// exactly the fields that changed.
    ///
    /// Everything happens in one transaction. An edit that changes nothing
    /// writes nothing and reports [`CommitError::NoEffectiveChange`].
    pub async fn save(
        db: &DatabaseConnection,
        target: Option<i32>,
        submission: GameSubmission,
        author_id: i32,
    ) -> Result<CommitOutcome, CommitError> {
        let GameSubmission {
            fields,
            screenshots,
            message,
        } = submission;

        let now = timestamp();
        let txn = db.begin().await?;

        let previous = match target {
            Some(id) => Some(
                Self::find_for_update(&txn, id)
                    .await?
                    .ok_or(CommitError::NotFound(id))?,
            ),
            None => None,
        };
        let stored = previous.as_ref().map(GameFields::from);

        let changes = fields.changes_from(stored.as_ref());
        if changes.is_empty() {
            txn.rollback().await?;
            return Err(CommitError::NoEffectiveChange);
        }
        let changed: Vec<&str> = changes.iter().map(FieldChange::field).collect();

        let entry = match previous {
            Some(previous) => {
                let mut entry: game::ActiveModel = previous.into();
                for change in changes.iter().cloned() {
                    change.apply(&mut entry);
                }
                entry.last_updated = Set(Some(now));
                entry.update(&txn).await?
            }
            None => fields.into_new_entry(now).insert(&txn).await?,
        };

        let revision = revision_row(entry.id, author_id, now, message, changes)
            .insert(&txn)
            .await?;

        ScreenshotService::replace(&txn, entry.id, &screenshots, now).await?;

        txn.commit().await?;

        tracing::info!(
            game_id = entry.id,
            revision_id = revision.id,
            author_id,
            ?changed,
            "Game saved"
        );

        Ok(CommitOutcome {
            id: entry.id,
            revision_id: revision.id,
            time_stamp: now,
        })
    }

    /// Load a game for editing, locking the row on backends that support it.
    async fn find_for_update<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Option<game::Model>, DbErr> {
        let mut query = game::Entity::find_by_id(id);
        if conn.get_database_backend() == DbBackend::Postgres {
            query = query.lock_exclusive();
        }
        query.one(conn).await
    }

    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Option<game::Model>, DbErr> {
        game::Entity::find_by_id(id).one(conn).await
    }

    /// Newest entries first.
    pub async fn recent<C: ConnectionTrait>(conn: &C) -> Result<Vec<game::Model>, DbErr> {
        game::Entity::find()
            .order_by_desc(game::Column::EntryCreated)
            .order_by_desc(game::Column::Id)
            .limit(RECENT_GAMES)
            .all(conn)
            .await
    }

    /// Every game with its rating figures, in the requested order.
    pub async fn list<C: ConnectionTrait>(
        conn: &C,
        order: SortOrder,
    ) -> Result<Vec<GameListRow>, DbErr> {
        let summaries = RatingService::summaries(conn).await?;

        let mut rows: Vec<GameListRow> = game::Entity::find()
            .select_only()
            .columns([
                game::Column::Id,
                game::Column::TitleJp,
                game::Column::TitleRomaji,
                game::Column::TitleEnglish,
            ])
            .into_tuple::<(i32, String, String, String)>()
            .all(conn)
            .await?
            .into_iter()
            .map(|(id, title_jp, title_romaji, title_english)| {
                let summary = summaries.get(&id).copied().unwrap_or_default();
                GameListRow {
                    id,
                    title_jp,
                    title_romaji,
                    title_english,
                    rating_bayesian: summary.bayesian,
                    ratings: summary.count,
                }
            })
            .collect();

        sort_rows(&mut rows, order);
        Ok(rows)
    }

    /// Everything the game page shows. `None` when the game doesn't exist.
    pub async fn view<C: ConnectionTrait>(
        conn: &C,
        id: i32,
        viewer_id: Option<i32>,
    ) -> Result<Option<GameViewPage>, DbErr> {
        let Some(game) = Self::find(conn, id).await? else {
            return Ok(None);
        };

        let summary = RatingService::summary(conn, id).await?;
        let user_rating = match viewer_id {
            Some(user_id) => RatingService::user_rating(conn, user_id, id).await?,
            None => None,
        };

        Ok(Some(GameViewPage {
            screenshots: ScreenshotService::enabled_urls(conn, id).await?,
            releases: ReleaseService::for_game(conn, id).await?,
            rating_count: summary.count,
            rating_average: summary.average,
            rating_bayesian: summary.bayesian,
            user_rating,
            ratings_recent: RatingService::recent_ratings(conn, id).await?,
            reviews_recent: RatingService::recent_reviews(conn, id).await?,
            game,
        }))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Order list rows. Empty titles and unrated games always come last; ties
/// fall back to the game id.
pub fn sort_rows(rows: &mut [GameListRow], order: SortOrder) {
    let direction = order.direction;
    rows.sort_by(|a, b| {
        let primary = match order.column {
            SortColumn::TitleEnglish => nulls_last(
                non_empty(&a.title_english),
                non_empty(&b.title_english),
                direction,
                |x, y| x.cmp(y),
            ),
            SortColumn::TitleJp => nulls_last(
                non_empty(&a.title_jp),
                non_empty(&b.title_jp),
                direction,
                |x, y| x.cmp(y),
            ),
            SortColumn::TitleRomaji => nulls_last(
                non_empty(&a.title_romaji),
                non_empty(&b.title_romaji),
                direction,
                |x, y| x.cmp(y),
            ),
            SortColumn::RatingBayesian => {
                nulls_last(a.rating_bayesian, b.rating_bayesian, direction, f64::total_cmp)
            }
            SortColumn::Ratings => direction.apply(a.ratings.cmp(&b.ratings)),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}
