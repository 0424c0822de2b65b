use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};

use super::check_save_failure;
use super::games::NO_REVISIONS;
use crate::auth::middleware::{PageContext, RequireUser};
use crate::dto::page::{NO_SUCH_ENTRY, Page, SAVE_FAILED};
use crate::dto::release::{ReleaseForm, ReleaseFormPage};
use crate::dto::revision::RevisionsPage;
use crate::error::AppError;
use crate::services::game_service::GameService;
use crate::services::release_service::{ReleaseService, ReleaseTarget};
use crate::services::revision_service::RevisionService;
use crate::state::AppState;
use crate::validation::release::validate_release;

/// Build the release route group: `/release/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new/{game_id}", get(new_release_form).post(create_release))
        .route("/edit/{id}", get(edit_release_form).post(update_release))
        .route("/revisions/{id}", get(release_revisions))
}

fn form_page(
    ctx: &PageContext,
    form: ReleaseForm,
    game_id: i32,
    release_id: Option<i32>,
) -> Page<ReleaseFormPage> {
    let (title, form_action) = match release_id {
        Some(id) => ("edit release", format!("/release/edit/{id}")),
        None => ("new release", format!("/release/new/{game_id}")),
    };
    ctx.page(
        title,
        ReleaseFormPage {
            form,
            form_action,
            editing: release_id.is_some(),
            game_id,
        },
    )
}

fn not_found() -> AppError {
    AppError::NotFound(NO_SUCH_ENTRY.to_string())
}

/// `GET /release/new/{game_id}`
async fn new_release_form(
    RequireUser { ctx, .. }: RequireUser,
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<Response, AppError> {
    GameService::find(&state.db, game_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(form_page(&ctx, ReleaseForm::default(), game_id, None).into_response())
}

/// `POST /release/new/{game_id}`
async fn create_release(
    RequireUser { ctx, user }: RequireUser,
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Form(form): Form<ReleaseForm>,
) -> Result<Response, AppError> {
    let submission = match validate_release(&form, false) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected release form");
            return Ok(form_page(&ctx, form, game_id, None)
                .with_error(e.message())
                .render(StatusCode::UNPROCESSABLE_ENTITY));
        }
    };

    match ReleaseService::save(&state.db, ReleaseTarget::New { game_id }, submission, user.id)
        .await
    {
        Ok(_) => Ok(Redirect::to(&format!("/game/view/{game_id}")).into_response()),
        Err(e) => {
            check_save_failure(e)?;
            Ok(form_page(&ctx, form, game_id, None)
                .with_error(SAVE_FAILED)
                .render(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

/// `GET /release/edit/{id}`
async fn edit_release_form(
    RequireUser { ctx, .. }: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let release = ReleaseService::find(&state.db, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(form_page(&ctx, ReleaseForm::prefill(&release), release.game_id, Some(id)).into_response())
}

/// `POST /release/edit/{id}`
async fn update_release(
    RequireUser { ctx, user }: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ReleaseForm>,
) -> Result<Response, AppError> {
    let game_id = ReleaseService::find(&state.db, id)
        .await?
        .ok_or_else(not_found)?
        .game_id;

    let submission = match validate_release(&form, true) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected release form");
            return Ok(form_page(&ctx, form, game_id, Some(id))
                .with_error(e.message())
                .render(StatusCode::UNPROCESSABLE_ENTITY));
        }
    };

    match ReleaseService::save(&state.db, ReleaseTarget::Existing(id), submission, user.id).await {
        Ok(_) => Ok(Redirect::to(&format!("/game/view/{game_id}")).into_response()),
        Err(e) => {
            check_save_failure(e)?;
            Ok(form_page(&ctx, form, game_id, Some(id))
                .with_error(SAVE_FAILED)
                .render(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

/// `GET /release/revisions/{id}`
async fn release_revisions(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let revisions = RevisionService::for_release(&state.db, id).await?;
    if revisions.is_empty() {
        return Err(AppError::NotFound(NO_REVISIONS.to_string()));
    }
    Ok(ctx
        .page("release revisions", RevisionsPage { revisions })
        .into_response())
}
