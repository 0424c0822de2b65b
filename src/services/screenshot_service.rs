use std::collections::HashSet;

use sea_orm::ActiveValue::Set;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::screenshot;

pub struct ScreenshotService;

impl ScreenshotService {
    /// Make `urls` the exact enabled screenshot set of a game.
    ///
    /// Screenshots left out are disabled rather than deleted. A URL seen
    /// before, for this game or another, is re-enabled and moved to this game.
    pub async fn replace<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
        urls: &[String],
        now: DateTimeWithTimeZone,
    ) -> Result<(), DbErr> {
        screenshot::Entity::update_many()
            .col_expr(screenshot::Column::Enabled, Expr::value(false))
            .filter(screenshot::Column::GameId.eq(game_id))
            .filter(screenshot::Column::Enabled.eq(true))
            .exec(conn)
            .await?;

        let mut seen = HashSet::new();
        let rows: Vec<_> = urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .map(|url| screenshot::ActiveModel {
                url: Set(url.clone()),
                game_id: Set(game_id),
                enabled: Set(true),
                time_stamp: Set(now),
                ..Default::default()
            })
            .collect();

        if rows.is_empty() {
            return Ok(());
        }

        screenshot::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(screenshot::Column::Url)
                    .update_columns([screenshot::Column::Enabled, screenshot::Column::GameId])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Enabled screenshot URLs of a game, oldest first.
    pub async fn enabled_urls<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
    ) -> Result<Vec<String>, DbErr> {
        Ok(screenshot::Entity::find()
            .filter(screenshot::Column::GameId.eq(game_id))
            .filter(screenshot::Column::Enabled.eq(true))
            .order_by_asc(screenshot::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(|s| s.url)
            .collect())
    }
}
