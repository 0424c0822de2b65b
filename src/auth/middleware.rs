use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::auth::session::SessionData;
use crate::dto::page::{Page, page_title};
use crate::entities::user;
use crate::error::AppError;
use crate::services::user_service::UserService;
use crate::state::AppState;
use crate::utils::build_info;

pub const LOGIN_PATH: &str = "/account/login";

/// Everything a handler needs to render a page for the current visitor.
///
/// The account is looked up again on every request, so a session naming a
/// user that no longer exists renders as logged out. A failed lookup is a
/// server error, not a logout.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub session: SessionData,
    pub user: Option<user::Model>,
    pub last_commit: &'static str,
}

impl PageContext {
    /// Wrap a page body with the title and the fields every page carries.
    pub fn page<T: Serialize>(&self, title: &str, body: T) -> Page<T> {
        Page {
            title: page_title(title),
            user: self.user.as_ref().map(|u| u.username.clone()),
            last_commit: self.last_commit,
            error: None,
            message: None,
            body,
        }
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = SessionData::from_jar(&jar, &state.config.session_secret);

        let user = match session.user.as_deref() {
            Some(username) => UserService::find_by_username(&state.db, username).await?,
            None => None,
        };

        Ok(Self {
            session,
            user,
            last_commit: build_info::last_commit().await,
        })
    }
}

/// A page context for a logged-in visitor.
///
/// Anonymous visitors are sent to the login page, and the URL they asked
/// for is remembered in their session so login can bring them back.
#[derive(Debug, Clone)]
pub struct RequireUser {
    pub ctx: PageContext,
    pub user: user::Model,
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = PageContext::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if let Some(user) = ctx.user.clone() {
            return Ok(Self { ctx, user });
        }

        // Nested routers see a stripped URI.
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0);
        let return_to = uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), ToString::to_string);
        let session = SessionData {
            user: None,
            return_to: Some(return_to),
        };

        let jar = CookieJar::from_headers(&parts.headers);
        match session.save(jar, &state.config) {
            Ok(jar) => Err((jar, Redirect::to(LOGIN_PATH)).into_response()),
            Err(e) => Err(AppError::Internal(e).into_response()),
        }
    }
}
