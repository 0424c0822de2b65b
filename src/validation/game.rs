use super::{ValidationError, check_limits, revision_message};
use crate::dto::game::GameForm;
use crate::revision::game::GameFields;

pub const TITLE_REQUIRED: &str = "At least one title is required (abbreviations don't count)";
pub const INVALID_SCREENSHOT: &str = "At least one of the screenshot URLs is invalid";

/// Limit on the whole screenshot box; a single URL may use all of it.
pub const SCREENSHOTS_MAX_CHARS: usize = 1100;

const IMAGE_EXTENSIONS: [&str; 4] = ["gif", "png", "jpg", "jpeg"];

/// A game form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSubmission {
    pub fields: GameFields,
    /// Screenshot URLs in submission order.
    pub screenshots: Vec<String>,
    pub message: String,
}

/// Check a submitted game form.
///
/// The revision message is checked first, then field lengths, the title
/// requirement and finally the screenshot URLs.
///
/// # Errors
///
/// Returns the first rule the form breaks.
pub fn validate_game(form: &GameForm, editing: bool) -> Result<GameSubmission, ValidationError> {
    let message = revision_message(&form.message, editing)?;

    check_limits(&[
        (form.title_jp.as_str(), 100),
        (form.title_romaji.as_str(), 100),
        (form.title_english.as_str(), 100),
        (form.title_other.as_str(), 100),
        (form.description.as_str(), 3100),
        (form.website.as_str(), 100),
        (form.vndb.as_str(), 25),
        (form.download.as_str(), 200),
        (form.download_alt.as_str(), 200),
        (form.screenshots.as_str(), SCREENSHOTS_MAX_CHARS),
    ])?;

    if [&form.title_jp, &form.title_romaji, &form.title_english]
        .iter()
        .all(|t| t.trim().is_empty())
    {
        return Err(ValidationError(TITLE_REQUIRED));
    }

    let screenshots = parse_screenshots(&form.screenshots)?;

    Ok(GameSubmission {
        fields: GameFields {
            title_jp: form.title_jp.clone(),
            title_romaji: form.title_romaji.clone(),
            title_english: form.title_english.clone(),
            title_english_official: form.english_title_is_official(),
            title_other: form.title_other.clone(),
            description: form.description.clone(),
            website: form.website.clone(),
            vndb: form.vndb.clone(),
            download: form.download.clone(),
            download_alt: form.download_alt.clone(),
            screenshots: screenshots.join("\n"),
        },
        screenshots,
        message,
    })
}

/// Split the screenshot box into URLs, skipping empty lines.
///
/// # Errors
///
/// Fails the whole list if any line is not an image URL.
pub fn parse_screenshots(blob: &str) -> Result<Vec<String>, ValidationError> {
    blob.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| {
            if is_image_url(line) {
                Ok(line.to_string())
            } else {
                Err(ValidationError(INVALID_SCREENSHOT))
            }
        })
        .collect()
}

/// An `http(s)` URL ending in an image extension, ignoring case.
#[must_use]
pub fn is_image_url(candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    let Some(rest) = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
    else {
        return false;
    };
    rest.rsplit_once('.')
        .is_some_and(|(body, ext)| !body.is_empty() && IMAGE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{AUTO_MESSAGE, CHARACTER_LIMIT, MESSAGE_REQUIRED};

    fn form() -> GameForm {
        GameForm {
            title_romaji: "Foo".to_string(),
            ..GameForm::default()
        }
    }

    #[test]
    fn test_minimal_new_game() {
        let submission = validate_game(&form(), false).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(submission.message, AUTO_MESSAGE);
        assert_eq!(submission.fields.title_romaji, "Foo");
        assert!(submission.screenshots.is_empty());
    }

    #[test]
    fn test_title_other_does_not_count_as_title() {
        let form = GameForm {
            title_other: "FOO".to_string(),
            ..GameForm::default()
        };
        assert_eq!(validate_game(&form, false), Err(ValidationError(TITLE_REQUIRED)));
    }

    #[test]
    fn test_each_field_limit() {
        let mut long = form();
        long.vndb = "v".repeat(26);
        assert_eq!(validate_game(&long, false), Err(ValidationError(CHARACTER_LIMIT)));

        let mut long = form();
        long.description = "d".repeat(3101);
        assert_eq!(validate_game(&long, false), Err(ValidationError(CHARACTER_LIMIT)));

        let mut fits = form();
        fits.description = "d".repeat(3100);
        assert!(validate_game(&fits, false).is_ok());
    }

    #[test]
    fn test_edit_checks_message_before_anything_else() {
        let form = GameForm {
            title_jp: "x".repeat(500),
            ..GameForm::default()
        };
        assert_eq!(validate_game(&form, true), Err(ValidationError(MESSAGE_REQUIRED)));
    }

    #[test]
    fn test_screenshots_are_normalised() {
        let mut form = form();
        form.screenshots =
            "https://a.example/1.PNG\r\n\r\nhttp://b.example/two.jpeg\n".to_string();
        let submission = validate_game(&form, false).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(
            submission.screenshots,
            vec!["https://a.example/1.PNG", "http://b.example/two.jpeg"]
        );
        assert_eq!(
            submission.fields.screenshots,
            "https://a.example/1.PNG\nhttp://b.example/two.jpeg"
        );
    }

    #[test]
    fn test_one_bad_screenshot_fails_the_batch() {
        let mut form = form();
        form.screenshots = "https://a.example/1.png\nhttps://a.example/2.bmp".to_string();
        assert_eq!(validate_game(&form, false), Err(ValidationError(INVALID_SCREENSHOT)));
    }

    #[test]
    fn test_image_url_rules() {
        assert!(is_image_url("http://x/y.gif"));
        assert!(is_image_url("HTTPS://X.EXAMPLE/Y.JPG"));
        assert!(!is_image_url("ftp://x/y.png"));
        assert!(!is_image_url("https://.png"));
        assert!(!is_image_url("https://x/y.png?size=2"));
        assert!(!is_image_url("https://x/png"));
    }

    #[test]
    fn test_checkbox_maps_to_flag() {
        let mut form = form();
        form.title_english_official = Some("on".to_string());
        let submission = validate_game(&form, false).unwrap_or_else(|e| unreachable!("{e}"));
        assert!(submission.fields.title_english_official);
    }

    #[test]
    fn test_single_screenshot_may_fill_the_box() {
        let prefix = "https://x.example/";
        let suffix = ".png";
        let url = format!(
            "{prefix}{}{suffix}",
            "a".repeat(SCREENSHOTS_MAX_CHARS - prefix.len() - suffix.len())
        );
        let mut form = form();
        form.screenshots.clone_from(&url);
        let submission = validate_game(&form, false).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(submission.screenshots, vec![url]);
        assert_eq!(submission.screenshots[0].chars().count(), SCREENSHOTS_MAX_CHARS);

        form.screenshots.push('x');
        assert_eq!(validate_game(&form, false), Err(ValidationError(CHARACTER_LIMIT)));
    }
}
