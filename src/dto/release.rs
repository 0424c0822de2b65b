use serde::{Deserialize, Serialize};

use crate::entities::release;

/// Body of `POST /release/new/{game_id}` and `POST /release/edit/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReleaseForm {
    pub title: String,
    pub platform: String,
    pub publisher: String,
    pub version: String,
    /// `YYYY-MM-DD`, with `?` for unknown digits.
    pub release_date: String,
    pub notes: String,
    pub message: String,
}

impl ReleaseForm {
    #[must_use]
    pub fn prefill(release: &release::Model) -> Self {
        Self {
            title: release.title.clone(),
            platform: release.platform.clone(),
            publisher: release.publisher.clone(),
            version: release.version.clone(),
            release_date: release.release_date.clone(),
            notes: release.notes.clone(),
            message: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseFormPage {
    pub form: ReleaseForm,
    pub form_action: String,
    pub editing: bool,
    pub game_id: i32,
}
