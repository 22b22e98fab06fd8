//! API configuration.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `roster.toml` in the working directory (optional)
//! 3. `ROSTER_*` environment variables (`ROSTER_HTTP_PORT=9000`)

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

/// Development-only signing secret. Rejected in production.
const DEV_JWT_SECRET: &str = "roster-dev-secret-change-in-production";

/// Where the server is running. Controls error detail in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Development,
    Production,
}

/// API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub max_connections: u32,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_access_lifetime_secs: i64,

    pub environment: RunMode,
}

impl ApiConfig {
    /// Loads defaults, then `roster.toml`, then `ROSTER_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("roster").required(false))
            .add_source(Environment::with_prefix("ROSTER").try_parsing(true));

        Self::from_builder(builder)
    }

    /// Builder preloaded with the built-in defaults.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("http_port", 8080)?
            .set_default("database_path", "./roster.db")?
            .set_default("max_connections", 5)?
            .set_default("jwt_secret", DEV_JWT_SECRET)?
            .set_default("jwt_access_lifetime_secs", 3600)? // 1 hour
            .set_default("environment", "development")?)
    }

    /// Builds and validates a configuration from any source stack.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: ApiConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == RunMode::Development
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("jwt_secret".to_string()));
        }

        if self.environment == RunMode::Production && self.jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::InvalidValue(
                "jwt_secret must be set explicitly in production".to_string(),
            ));
        }

        if self.jwt_access_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "jwt_access_lifetime_secs must be positive".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
