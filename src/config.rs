use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Deserialize;

const DEFAULT_SSL: bool = true;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_IDLE_TIMEOUT_MILLIS: u64 = 30_000;
const SESSION_SECRET_LEN: usize = 60;
const ONE_WEEK_SECS: u64 = 60 * 60 * 24 * 7;

/// Application configuration, built once at startup and handed to the pool and router.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub session_secret: String,
    pub session_duration_secs: u64,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Database connection descriptor plus pool sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub ssl: bool,
    pub max_connections: u32,
    pub idle_timeout: Duration,
}

/// The `db` section of the JSON config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl: Option<bool>,
    pub max: Option<u32>,
    pub idle_timeout_millis: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    db: FileDatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables and the optional config file.
    ///
    /// `DATABASE_URL` wins over the file's connection fields; pool settings still
    /// come from the file when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if no database configuration is found, the config file is
    /// malformed, or `SERVER_HOST` / `SERVER_PORT` contain invalid values.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config_path =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.json".to_string());
        let file = load_file(Path::new(&config_path))?;
        let database =
            DatabaseConfig::resolve(std::env::var("DATABASE_URL").ok(), file.as_ref())?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        // Without SESSION_SECRET, sessions only live as long as the process.
        let session_secret =
            std::env::var("SESSION_SECRET").unwrap_or_else(|_| random_secret());

        Ok(Self {
            database,
            server_host,
            server_port,
            environment,
            log_level,
            session_secret,
            session_duration_secs: ONE_WEEK_SECS,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }

    /// Whether session cookies must only travel over HTTPS.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl DatabaseConfig {
    /// Combine the environment's `DATABASE_URL` with the config file.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source is available.
    pub fn resolve(
        env_url: Option<String>,
        file: Option<&FileDatabaseConfig>,
    ) -> anyhow::Result<Self> {
        let ssl = file.and_then(|f| f.ssl).unwrap_or(DEFAULT_SSL);
        let max_connections = file.and_then(|f| f.max).unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let idle_timeout = Duration::from_millis(
            file.and_then(|f| f.idle_timeout_millis)
                .unwrap_or(DEFAULT_IDLE_TIMEOUT_MILLIS),
        );

        let url = match (env_url.filter(|u| !u.is_empty()), file) {
            (Some(url), _) => url,
            (None, Some(f)) => format!(
                "postgres://{}:{}@{}:{}/{}",
                urlencoding::encode(&f.user),
                urlencoding::encode(&f.password),
                f.host,
                f.port,
                f.database
            ),
            (None, None) => anyhow::bail!(
                "Can't connect to database: set DATABASE_URL or provide a config file"
            ),
        };

        Ok(Self {
            url,
            ssl,
            max_connections,
            idle_timeout,
        })
    }

    /// The URL handed to the driver, with `sslmode=require` added for
    /// PostgreSQL when SSL is on and the URL doesn't already choose a mode.
    #[must_use]
    pub fn connection_url(&self) -> String {
        let is_postgres =
            self.url.starts_with("postgres://") || self.url.starts_with("postgresql://");
        if !self.ssl || !is_postgres || self.url.contains("sslmode=") {
            return self.url.clone();
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}sslmode=require", self.url)
    }
}

fn load_file(path: &Path) -> anyhow::Result<Option<FileDatabaseConfig>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let file: ConfigFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(file.db))
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_SECRET_LEN)
        .map(char::from)
        .collect()
}
