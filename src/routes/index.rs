use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::auth::middleware::PageContext;
use crate::dto::game::HomePage;
use crate::dto::revision::RevisionsPage;
use crate::error::AppError;
use crate::services::game_service::GameService;
use crate::services::revision_service::RevisionService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/revisions", get(recent_revisions))
}

/// `GET /`: the newest entries.
async fn home(ctx: PageContext, State(state): State<AppState>) -> Result<Response, AppError> {
    let games = GameService::recent(&state.db).await?;
    Ok(ctx.page("home", HomePage { games }).into_response())
}

/// `GET /revisions`: latest edits across the site.
async fn recent_revisions(
    ctx: PageContext,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let revisions = RevisionService::recent(&state.db).await?;
    Ok(ctx
        .page("recent revisions", RevisionsPage { revisions })
        .into_response())
}
