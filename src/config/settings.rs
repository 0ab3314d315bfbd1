//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Session cookie and lifetime settings
    pub session: SessionSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Dashboard figures that are not derived from data yet
    pub dashboard: DashboardSettings,

    /// Log output configuration
    pub logging: LoggingSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,

    /// Insert demo data on startup when the users table is empty
    pub seed: bool,
}

/// Server-side session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Name of the cookie carrying the session token
    pub cookie_name: String,

    /// Session lifetime in hours
    pub ttl_hours: i64,

    /// Mark the cookie `Secure` (HTTPS only)
    pub secure_cookie: bool,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    /// Monthly revenue shown on the dashboard until billing totals are wired in
    pub monthly_revenue: i64,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Human readable or JSON lines
    pub format: LogFormat,
}

/// Minimum session lifetime accepted by [`Settings::load`].
pub const MIN_SESSION_TTL_HOURS: i64 = 1;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the session lifetime is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("database.seed", false)?
            .set_default("session.cookie_name", "sid")?
            .set_default("session.ttl_hours", 168)?
            .set_default("session.secure_cookie", false)?
            .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
            .set_default("dashboard.monthly_revenue", 125_400_i64)?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=5000 -> server.port = 5000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                if settings.session.ttl_hours < MIN_SESSION_TTL_HOURS {
                    return Err(ConfigError::Message(format!(
                        "session.ttl_hours must be at least {}. Current value: {}",
                        MIN_SESSION_TTL_HOURS, settings.session.ttl_hours
                    )));
                }
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether the process runs with production hardening (HSTS, secure cookies).
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
