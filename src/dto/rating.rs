use serde::Deserialize;

/// Body of `POST /game/updateRating`. Numbers arrive as raw strings and are
/// parsed during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingForm {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub user_rating: String,
}

/// Body of `POST /game/updateReview`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub review: String,
}
