#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use dgdb::config::{Config, DatabaseConfig, Environment};
use dgdb::state::AppState;

pub const PASSWORD: &str = "correct-horse-battery";

/// A fresh app on an in-memory SQLite database, plus a handle to that database.
pub async fn test_app() -> (Router, DatabaseConnection) {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();

    let state = AppState {
        db: db.clone(),
        config: Config {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                ssl: false,
                max_connections: 1,
                idle_timeout: Duration::from_secs(30),
            },
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
            session_secret: "test-secret-key-for-testing-only".to_string(),
            session_duration_secs: 3600,
        },
    };

    (dgdb::routes::router().with_state(state), db)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// The `session=...` pair from `Set-Cookie`, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session="))
            .and_then(|v| v.split(';').next())
            .map(ToString::to_string)
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap_or_default(),
    }
}

/// Test helper: send a GET request, optionally with a session cookie.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap_or_default()).await
}

/// Test helper: POST a urlencoded form, optionally with a session cookie.
pub async fn post_form(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> TestResponse {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body)).unwrap_or_default()).await
}

/// Register an account, log in, and return the session cookie.
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let registered = post_form(
        app,
        "/account/register",
        &[("username", username), ("password", PASSWORD)],
        None,
    )
    .await;
    assert_eq!(registered.status, StatusCode::OK, "register failed: {}", registered.body);

    let login = post_form(
        app,
        "/account/login",
        &[("username", username), ("password", PASSWORD)],
        None,
    )
    .await;
    assert_eq!(login.status, StatusCode::SEE_OTHER, "login failed: {}", login.body);
    login.session_cookie().unwrap_or_default()
}

/// Create a game through the form and return its id.
pub async fn create_game(app: &Router, cookie: &str, fields: &[(&str, &str)]) -> i32 {
    let created = post_form(app, "/game/new", fields, Some(cookie)).await;
    assert_eq!(created.status, StatusCode::SEE_OTHER, "create failed: {}", created.body);
    created
        .location()
        .rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .unwrap_or_default()
}
