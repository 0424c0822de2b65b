use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub const SESSION_COOKIE: &str = "session";

/// Per-visitor state carried between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Username of the logged-in account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Where to send the visitor after a successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    data: SessionData,
    exp: i64,
    iat: i64,
}

impl SessionData {
    #[must_use]
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            user: Some(username.into()),
            return_to: None,
        }
    }

    /// Sign the session into a cookie value.
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn encode(&self, config: &Config) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        #[allow(clippy::cast_possible_wrap)]
        let exp = now + config.session_duration_secs as i64;

        let claims = SessionClaims {
            data: self.clone(),
            exp,
            iat: now,
        };
        let key = EncodingKey::from_secret(config.session_secret.as_bytes());
        encode(&Header::default(), &claims, &key)
            .map_err(|e| anyhow::anyhow!("Failed to encode session: {e}"))
    }

    /// Verify a cookie value and recover the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is wrong or the session expired.
    pub fn decode(token: &str, secret: &str) -> anyhow::Result<Self> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        let token_data = decode::<SessionClaims>(token, &key, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid session: {e}"))?;
        Ok(token_data.claims.data)
    }

    /// Read the session from the request's cookies. Missing, tampered and
    /// expired cookies all yield an anonymous session.
    #[must_use]
    pub fn from_jar(jar: &CookieJar, secret: &str) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Self::default();
        };
        Self::decode(cookie.value_trimmed(), secret).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Discarding session cookie");
            Self::default()
        })
    }

    /// The cookie persisting this session.
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn cookie(&self, config: &Config) -> anyhow::Result<Cookie<'static>> {
        let token = self.encode(config)?;
        #[allow(clippy::cast_possible_wrap)]
        let max_age = time::Duration::seconds(config.session_duration_secs as i64);

        Ok(Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .secure(config.secure_cookies())
            .build())
    }

    /// Store this session in `jar`, replacing whatever the visitor sent.
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn save(&self, jar: CookieJar, config: &Config) -> anyhow::Result<CookieJar> {
        Ok(jar.add(self.cookie(config)?))
    }
}

/// Drop the session cookie.
#[must_use]
pub fn forget(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
