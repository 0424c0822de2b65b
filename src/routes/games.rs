use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};

use super::check_save_failure;
use crate::auth::middleware::{PageContext, RequireUser};
use crate::dto::game::{GameForm, GameFormPage, GameListPage, ListQuery, SortState};
use crate::dto::page::{NO_SUCH_ENTRY, Page, SAVE_FAILED};
use crate::dto::rating::{RatingForm, ReviewForm};
use crate::dto::revision::RevisionsPage;
use crate::error::AppError;
use crate::services::game_service::GameService;
use crate::services::rating_service::RatingService;
use crate::services::revision_service::RevisionService;
use crate::state::AppState;
use crate::utils::sort::{SortColumn, SortOrder, sort_url};
use crate::validation::game::validate_game;
use crate::validation::rating::{validate_rating, validate_review};

pub const NO_REVISIONS: &str = "No revisions were found";

const SUCCESS: &str = "success";
const FAILURE: &str = "failure";

/// Build the game route group: `/game/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_games))
        .route("/view/{id}", get(view_game))
        .route("/new", get(new_game_form).post(create_game))
        .route("/edit/{id}", get(edit_game_form).post(update_game))
        .route("/revisions/{id}", get(game_revisions))
        .route("/updateRating", post(update_rating))
        .route("/updateReview", post(update_review))
}

fn form_page(ctx: &PageContext, form: GameForm, id: Option<i32>) -> Page<GameFormPage> {
    let (title, form_action) = match id {
        Some(id) => ("edit game", format!("/game/edit/{id}")),
        None => ("new game", "/game/new".to_string()),
    };
    ctx.page(
        title,
        GameFormPage {
            form,
            form_action,
            editing: id.is_some(),
        },
    )
}

/// `GET /game/list?s={column}&o={asc|desc}`
async fn list_games(
    ctx: PageContext,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let (s, o) = (query.s.as_deref(), query.o.as_deref());
    let order = SortOrder::from_query(s, o);
    let games = GameService::list(&state.db, order).await?;

    let body = GameListPage {
        games,
        sort: SortState {
            column: order.column.as_str(),
            direction: order.direction.as_str(),
        },
        sort_urls: SortColumn::ALL
            .into_iter()
            .map(|column| (column.as_str(), sort_url(s, o, column)))
            .collect(),
    };
    Ok(ctx.page("game list", body).into_response())
}

/// `GET /game/view/{id}`
async fn view_game(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let viewer = ctx.user.as_ref().map(|u| u.id);
    let view = GameService::view(&state.db, id, viewer)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_SUCH_ENTRY.to_string()))?;

    let title = view.game.display_title().to_string();
    Ok(ctx.page(&title, view).into_response())
}

async fn new_game_form(RequireUser { ctx, .. }: RequireUser) -> Response {
    form_page(&ctx, GameForm::default(), None).into_response()
}

/// `POST /game/new`
async fn create_game(
    RequireUser { ctx, user }: RequireUser,
    State(state): State<AppState>,
    Form(form): Form<GameForm>,
) -> Result<Response, AppError> {
    let submission = match validate_game(&form, false) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected game form");
            return Ok(form_page(&ctx, form, None)
                .with_error(e.message())
                .render(StatusCode::UNPROCESSABLE_ENTITY));
        }
    };

    match GameService::save(&state.db, None, submission, user.id).await {
        Ok(outcome) => Ok(Redirect::to(&format!("/game/view/{}", outcome.id)).into_response()),
        Err(e) => {
            check_save_failure(e)?;
            Ok(form_page(&ctx, form, None)
                .with_error(SAVE_FAILED)
                .render(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

/// `GET /game/edit/{id}`: the form filled with the stored entry.
async fn edit_game_form(
    RequireUser { ctx, .. }: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let game = GameService::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_SUCH_ENTRY.to_string()))?;

    Ok(form_page(&ctx, GameForm::prefill(&game), Some(id)).into_response())
}

/// `POST /game/edit/{id}`
async fn update_game(
    RequireUser { ctx, user }: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GameForm>,
) -> Result<Response, AppError> {
    let submission = match validate_game(&form, true) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected game form");
            return Ok(form_page(&ctx, form, Some(id))
                .with_error(e.message())
                .render(StatusCode::UNPROCESSABLE_ENTITY));
        }
    };

    match GameService::save(&state.db, Some(id), submission, user.id).await {
        Ok(outcome) => Ok(Redirect::to(&format!("/game/view/{}", outcome.id)).into_response()),
        Err(e) => {
            check_save_failure(e)?;
            Ok(form_page(&ctx, form, Some(id))
                .with_error(SAVE_FAILED)
                .render(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

/// `GET /game/revisions/{id}`
async fn game_revisions(
    ctx: PageContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let revisions = RevisionService::for_game(&state.db, id).await?;
    if revisions.is_empty() {
        return Err(AppError::NotFound(NO_REVISIONS.to_string()));
    }
    Ok(ctx
        .page("game revisions", RevisionsPage { revisions })
        .into_response())
}

/// `POST /game/updateRating`: answers `success` or `failure` as plain text.
async fn update_rating(
    RequireUser { user, .. }: RequireUser,
    State(state): State<AppState>,
    Form(form): Form<RatingForm>,
) -> &'static str {
    let (game_id, rating) = match validate_rating(&form) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, user_id = user.id, "Rejected rating");
            return FAILURE;
        }
    };

    match RatingService::upsert_rating(&state.db, user.id, game_id, rating).await {
        Ok(()) => {
            tracing::info!(user_id = user.id, game_id, rating, "Rating saved");
            SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, game_id, "Failed to save rating");
            FAILURE
        }
    }
}

/// `POST /game/updateReview`: answers `success` or `failure` as plain text.
async fn update_review(
    RequireUser { user, .. }: RequireUser,
    State(state): State<AppState>,
    Form(form): Form<ReviewForm>,
) -> &'static str {
    let (game_id, review) = match validate_review(&form) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, user_id = user.id, "Rejected review");
            return FAILURE;
        }
    };

    match RatingService::upsert_review(&state.db, user.id, game_id, review).await {
        Ok(()) => {
            tracing::info!(user_id = user.id, game_id, "Review saved");
            SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, game_id, "Failed to save review");
            FAILURE
        }
    }
}
