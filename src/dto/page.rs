use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const SITE_NAME: &str = "DGDB";

/// Shown whenever a database call fails; internal detail stays in the logs.
pub const GENERIC_FAILURE: &str = "Something went wrong; please try again";

/// Shown when saving an entry fails, including edits that changed nothing.
pub const SAVE_FAILED: &str =
    "Something went wrong; please try again. Did you not make any changes?";

pub const NO_SUCH_ENTRY: &str = "No entry with that ID exists";

/// `"DGDB // {suffix}"`
#[must_use]
pub fn page_title(suffix: &str) -> String {
    format!("{SITE_NAME} // {suffix}")
}

/// The model handed to the template layer for one page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub title: String,
    /// Username of the logged-in visitor.
    pub user: Option<String>,
    pub last_commit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Page<T> {
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Render with an explicit status code.
    pub fn render(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        self.render(StatusCode::OK)
    }
}
