//! Form checks that run before anything touches the database.
//!
//! Each check returns the first violated rule as a user-facing message.

pub mod account;
pub mod game;
pub mod rating;
pub mod release;

pub const CHARACTER_LIMIT: &str = "Bypassing the character limit is bad!";
pub const BLANK_FIELD: &str = "A required field was left blank";
pub const MESSAGE_REQUIRED: &str = "Please enter a revision message noting what change(s) you made";

pub const MESSAGE_MAX_CHARS: usize = 310;

/// Revision message recorded for newly created entries.
pub const AUTO_MESSAGE: &str = "(auto) New entry";

/// A violated input rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

impl ValidationError {
    #[must_use]
    pub const fn message(self) -> &'static str {
        self.0
    }
}

/// Fail when any value is longer than its limit, counted in characters.
pub(crate) fn check_limits(limits: &[(&str, usize)]) -> Result<(), ValidationError> {
    if limits
        .iter()
        .any(|(value, max)| value.chars().count() > *max)
    {
        return Err(ValidationError(CHARACTER_LIMIT));
    }
    Ok(())
}

/// The message to record with a revision. Edits must explain themselves;
/// creations get [`AUTO_MESSAGE`].
pub fn revision_message(submitted: &str, editing: bool) -> Result<String, ValidationError> {
    if !editing {
        return Ok(AUTO_MESSAGE.to_string());
    }
    if submitted.trim().is_empty() {
        return Err(ValidationError(MESSAGE_REQUIRED));
    }
    check_limits(&[(submitted, MESSAGE_MAX_CHARS)])?;
    Ok(submitted.to_string())
}
