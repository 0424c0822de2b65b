mod account;
mod games;
mod health;
mod index;
mod releases;

use axum::Router;

use crate::dto::page::NO_SUCH_ENTRY;
use crate::error::AppError;
use crate::revision::CommitError;
use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `/`, `/revisions`: home page and site-wide history
/// - `/account/...`: login, registration, logout
/// - `/game/...`: list, view, create, edit, rate, review, history
/// - `/release/...`: create, edit, history
/// - `/health`: health check with database connectivity
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(index::router())
        .merge(health::router())
        .nest("/account", account::router())
        .nest("/game", games::router())
        .nest("/release", releases::router())
}

/// Log a failed save. A missing entry becomes a 404 page; every other cause
/// re-renders the form with a generic failure message.
fn check_save_failure(err: CommitError) -> Result<(), AppError> {
    match err {
        CommitError::NotFound(id) => {
            tracing::info!(id, "Save targeted a missing entry");
            Err(AppError::NotFound(NO_SUCH_ENTRY.to_string()))
        }
        CommitError::NoEffectiveChange => {
            tracing::info!("Save rejected: nothing changed");
            Ok(())
        }
        CommitError::Persistence(e) => {
            tracing::error!(error = %e, "Save failed");
            Ok(())
        }
    }
}
