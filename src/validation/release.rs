use super::{ValidationError, check_limits, revision_message};
use crate::dto::release::ReleaseForm;
use crate::revision::release::ReleaseFields;

pub const PLATFORM_REQUIRED: &str = "A platform is required";
pub const INVALID_RELEASE_DATE: &str =
    "Release dates must be written as YYYY-MM-DD, with ? for unknown digits";

/// A release form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSubmission {
    pub fields: ReleaseFields,
    pub message: String,
}

/// Check a submitted release form.
///
/// # Errors
///
/// Returns the first rule the form breaks.
pub fn validate_release(
    form: &ReleaseForm,
    editing: bool,
) -> Result<ReleaseSubmission, ValidationError> {
    let message = revision_message(&form.message, editing)?;

    check_limits(&[
        (form.title.as_str(), 100),
        (form.platform.as_str(), 50),
        (form.publisher.as_str(), 100),
        (form.version.as_str(), 50),
        (form.release_date.as_str(), 10),
        (form.notes.as_str(), 1000),
    ])?;

    if form.platform.trim().is_empty() {
        return Err(ValidationError(PLATFORM_REQUIRED));
    }

    if !form.release_date.is_empty() && !is_release_date(&form.release_date) {
        return Err(ValidationError(INVALID_RELEASE_DATE));
    }

    Ok(ReleaseSubmission {
        fields: ReleaseFields {
            title: form.title.clone(),
            platform: form.platform.clone(),
            publisher: form.publisher.clone(),
            version: form.version.clone(),
            release_date: form.release_date.clone(),
            notes: form.notes.clone(),
        },
        message,
    })
}

/// `DDDD-DD-DD` where each `D` is a digit or `?`.
#[must_use]
pub fn is_release_date(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit() || *b == b'?',
        })
}
