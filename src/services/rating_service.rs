use std::collections::HashMap;

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::dto::game::{RecentRating, RecentReview};
use crate::entities::{rating, review, user};
use crate::revision::timestamp;

/// Votes a game needs before its own average outweighs the prior.
pub const MINIMUM_VOTES: f64 = 1.0;
/// Prior every game's rating is pulled toward.
pub const GLOBAL_AVERAGE: f64 = 5.5;

/// How many ratings and reviews the game page shows.
pub const RECENT_LIMIT: u64 = 10;

/// Aggregate ratings of one game.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingSummary {
    pub count: i64,
    /// Mean rating, two decimals.
    pub average: Option<f64>,
    pub bayesian: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct RatingAggregate {
    game_id: i32,
    votes: i64,
    average: Option<f64>,
}

impl From<&RatingAggregate> for RatingSummary {
    fn from(row: &RatingAggregate) -> Self {
        Self {
            count: row.votes,
            average: row.average.map(round2),
            bayesian: row.average.map(|avg| bayesian_rating(row.votes, avg)),
        }
    }
}

#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `(v·R + m·C) / (v + m)` rounded to two decimals, where `v` is the vote
/// count, `R` the game's mean, `m` [`MINIMUM_VOTES`] and `C` [`GLOBAL_AVERAGE`].
#[must_use]
pub fn bayesian_rating(votes: i64, average: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let v = votes as f64;
    round2(v.mul_add(average, MINIMUM_VOTES * GLOBAL_AVERAGE) / (v + MINIMUM_VOTES))
}

pub struct RatingService;

impl RatingService {
    /// Insert or overwrite a user's rating of a game.
    pub async fn upsert_rating<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        game_id: i32,
        value: f64,
    ) -> Result<(), DbErr> {
        rating::Entity::insert(rating::ActiveModel {
            user_id: Set(user_id),
            game_id: Set(game_id),
            rating: Set(value),
            time_stamp: Set(timestamp()),
        })
        .on_conflict(
            OnConflict::columns([rating::Column::UserId, rating::Column::GameId])
                .update_columns([rating::Column::Rating, rating::Column::TimeStamp])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    /// Insert or overwrite a user's review of a game.
    pub async fn upsert_review<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        game_id: i32,
        text: String,
    ) -> Result<(), DbErr> {
        review::Entity::insert(review::ActiveModel {
            user_id: Set(user_id),
            game_id: Set(game_id),
            review: Set(text),
            time_stamp: Set(timestamp()),
        })
        .on_conflict(
            OnConflict::columns([review::Column::UserId, review::Column::GameId])
                .update_columns([review::Column::Review, review::Column::TimeStamp])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    async fn aggregates<C: ConnectionTrait>(
        conn: &C,
        game_id: Option<i32>,
    ) -> Result<Vec<RatingAggregate>, DbErr> {
        let mut query = rating::Entity::find()
            .select_only()
            .column(rating::Column::GameId)
            .column_as(
                SimpleExpr::from(Func::count(Expr::col(rating::Column::Rating))),
                "votes",
            )
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(rating::Column::Rating))),
                "average",
            )
            .group_by(rating::Column::GameId);
        if let Some(game_id) = game_id {
            query = query.filter(rating::Column::GameId.eq(game_id));
        }
        query.into_model::<RatingAggregate>().all(conn).await
    }

    /// Rating summaries keyed by game id. Unrated games are absent.
    pub async fn summaries<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<HashMap<i32, RatingSummary>, DbErr> {
        Ok(Self::aggregates(conn, None)
            .await?
            .iter()
            .map(|row| (row.game_id, RatingSummary::from(row)))
            .collect())
    }

    pub async fn summary<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
    ) -> Result<RatingSummary, DbErr> {
        Ok(Self::aggregates(conn, Some(game_id))
            .await?
            .first()
            .map(RatingSummary::from)
            .unwrap_or_default())
    }

    pub async fn user_rating<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        game_id: i32,
    ) -> Result<Option<f64>, DbErr> {
        Ok(rating::Entity::find_by_id((user_id, game_id))
            .one(conn)
            .await?
            .map(|r| r.rating))
    }

    /// Most recent ratings of a game with their authors.
    pub async fn recent_ratings<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
    ) -> Result<Vec<RecentRating>, DbErr> {
        Ok(rating::Entity::find()
            .find_also_related(user::Entity)
            .filter(rating::Column::GameId.eq(game_id))
            .order_by_desc(rating::Column::TimeStamp)
            .limit(RECENT_LIMIT)
            .all(conn)
            .await?
            .into_iter()
            .map(|(rating, author)| RecentRating {
                username: author.map(|u| u.username).unwrap_or_default(),
                rating: rating.rating,
                time_stamp: rating.time_stamp,
            })
            .collect())
    }

    /// Most recent reviews of a game with their authors.
    pub async fn recent_reviews<C: ConnectionTrait>(
        conn: &C,
        game_id: i32,
    ) -> Result<Vec<RecentReview>, DbErr> {
        Ok(review::Entity::find()
            .find_also_related(user::Entity)
            .filter(review::Column::GameId.eq(game_id))
            .order_by_desc(review::Column::TimeStamp)
            .limit(RECENT_LIMIT)
            .all(conn)
            .await?
            .into_iter()
            .map(|(review, author)| RecentReview {
                username: author.map(|u| u.username).unwrap_or_default(),
                review: review.review,
                time_stamp: review.time_stamp,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bayesian_rating_single_vote() {
        // (1 * 9 + 1 * 5.5) / 2
        assert!((bayesian_rating(1, 9.0) - 7.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bayesian_rating_converges_to_average() {
        let many = bayesian_rating(1_000, 8.0);
        assert!(many > 7.99 && many <= 8.0);
        assert!((bayesian_rating(3, 5.5) - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bayesian_rating_rounds_to_two_decimals() {
        // (2 * 7 + 5.5) / 3 = 6.5
        assert!((bayesian_rating(2, 7.0) - 6.5).abs() < f64::EPSILON);
        // (3 * 10 + 5.5) / 4 = 8.875
        assert!((bayesian_rating(3, 10.0) - 8.88).abs() < 1e-9);
    }

    #[test]
    fn test_summary_from_aggregate() {
        let row = RatingAggregate {
            game_id: 1,
            votes: 2,
            average: Some(7.333_333),
        };
        let summary = RatingSummary::from(&row);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Some(7.33));
    }
}
