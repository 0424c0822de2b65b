use super::{BLANK_FIELD, CHARACTER_LIMIT, ValidationError};
use crate::dto::rating::{RatingForm, ReviewForm};

pub const INVALID_GAME_ID: &str = "Invalid game ID";
pub const INVALID_RATING: &str = "Ratings must be numbers between 1 and 10";

pub const REVIEW_MAX_CHARS: usize = 11_000;

/// Round to one decimal place, halves away from zero.
#[must_use]
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_game_id(raw: &str) -> Result<i32, ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError(INVALID_GAME_ID)),
    }
}

/// Parse a rating submission into `(game_id, rating)`.
///
/// The bounds check applies to the rounded value.
///
/// # Errors
///
/// Fails on a bad game id, a non-numeric rating or one outside `[1, 10]`.
pub fn validate_rating(form: &RatingForm) -> Result<(i32, f64), ValidationError> {
    let game_id = parse_game_id(&form.game_id)?;
    let rating = form
        .user_rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .map(round_rating)
        .filter(|r| (1.0..=10.0).contains(r))
        .ok_or(ValidationError(INVALID_RATING))?;
    Ok((game_id, rating))
}

/// Parse a review submission into `(game_id, review)`.
///
/// # Errors
///
/// Fails on a bad game id or an empty or overlong review.
pub fn validate_review(form: &ReviewForm) -> Result<(i32, String), ValidationError> {
    let game_id = parse_game_id(&form.game_id)?;
    if form.review.trim().is_empty() {
        return Err(ValidationError(BLANK_FIELD));
    }
    if form.review.chars().count() > REVIEW_MAX_CHARS {
        return Err(ValidationError(CHARACTER_LIMIT));
    }
    Ok((game_id, form.review.clone()))
}
