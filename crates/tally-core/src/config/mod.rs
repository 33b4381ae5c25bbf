//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, BootstrapAccount};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `TALLY__` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL. Without one, credentials are kept in memory.
    #[serde(default)]
    pub url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `TALLY__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [auth]
            jwt_secret = "test-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.is_none());
        assert_eq!(config.auth.jwt_ttl_minutes, 1440);
        assert_eq!(config.auth.password_min_length, 5);
        assert!(config.auth.revocation_enabled);
        assert_eq!(config.logging.format, "json");
        assert!(config.auth.bootstrap.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [database]
            url = "postgres://tally@localhost/tally"

            [auth]
            jwt_secret = "s"
            jwt_ttl_minutes = 30
            revocation_enabled = false

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://tally@localhost/tally")
        );
        assert_eq!(config.auth.jwt_ttl_minutes, 30);
        assert!(!config.auth.revocation_enabled);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_bootstrap_account() {
        let config = AppConfig::from_toml(
            r#"
            [auth]
            jwt_secret = "s"

            [auth.bootstrap]
            email = "admin@tally.dev"
            password = "admin1"
            "#,
        )
        .unwrap();

        let account = config.auth.bootstrap.unwrap();
        assert_eq!(account.email, "admin@tally.dev");
        assert_eq!(account.password, "admin1");
    }

    #[test]
    fn test_missing_auth_section_is_an_error() {
        assert!(AppConfig::from_toml("[server]\nport = 1\n").is_err());
    }
}
