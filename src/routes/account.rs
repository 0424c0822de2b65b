use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::middleware::PageContext;
use crate::auth::session::{self, SessionData};
use crate::dto::account::{AccountPage, CredentialsForm};
use crate::error::AppError;
use crate::services::user_service::{LoginOutcome, UserService};
use crate::state::AppState;
use crate::validation::account::{validate_login, validate_registration};

pub const USERNAME_TAKEN: &str = "Username is taken";
pub const UNKNOWN_USER: &str = "No user with that username exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ACCOUNT_CREATED: &str = "Account created! You may now login";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout).post(logout))
}

/// Only same-site paths are followed after login.
fn safe_return_path(return_to: Option<&str>) -> &str {
    return_to
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or("/")
}

/// `GET /account/login`
async fn login_form(ctx: PageContext) -> Response {
    if ctx.user.is_some() {
        return Redirect::to("/").into_response();
    }
    ctx.page("login", AccountPage::empty()).into_response()
}

/// `POST /account/login`
async fn login(
    ctx: PageContext,
    jar: CookieJar,
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let page = ctx.page("login", AccountPage::echo(&form));

    if let Err(e) = validate_login(&form.username, &form.password) {
        tracing::debug!(error = %e, "Rejected login form");
        return Ok(page
            .with_error(e.message())
            .render(StatusCode::UNPROCESSABLE_ENTITY));
    }

    let user = match UserService::authenticate(&state.db, &form.username, &form.password).await? {
        LoginOutcome::Success(user) => user,
        LoginOutcome::UnknownUser => {
            return Ok(page.with_error(UNKNOWN_USER).render(StatusCode::UNAUTHORIZED));
        }
        LoginOutcome::WrongPassword => {
            tracing::info!(username = %form.username, "Failed login attempt");
            return Ok(page
                .with_error(INVALID_CREDENTIALS)
                .render(StatusCode::UNAUTHORIZED));
        }
    };

    let target = safe_return_path(ctx.session.return_to.as_deref()).to_string();
    let jar = SessionData::logged_in(user.username.clone()).save(jar, &state.config)?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok((jar, Redirect::to(&target)).into_response())
}

async fn register_form(ctx: PageContext) -> Response {
    if ctx.user.is_some() {
        return Redirect::to("/").into_response();
    }
    ctx.page("register", AccountPage::empty()).into_response()
}

/// `POST /account/register`
async fn register(
    ctx: PageContext,
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if let Err(e) = validate_registration(&form.username, &form.password) {
        tracing::debug!(error = %e, "Rejected registration form");
        return Ok(ctx
            .page("register", AccountPage::echo(&form))
            .with_error(e.message())
            .render(StatusCode::UNPROCESSABLE_ENTITY));
    }

    match UserService::register(&state.db, &form.username, &form.password).await? {
        Some(_) => Ok(ctx
            .page("login", AccountPage::empty())
            .with_message(ACCOUNT_CREATED)
            .into_response()),
        None => Ok(ctx
            .page("register", AccountPage::echo(&form))
            .with_error(USERNAME_TAKEN)
            .render(StatusCode::CONFLICT)),
    }
}

/// `GET|POST /account/logout`
async fn logout(jar: CookieJar) -> Response {
    (session::forget(jar), Redirect::to("/")).into_response()
}
