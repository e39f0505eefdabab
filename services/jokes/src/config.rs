//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `jokes.toml` in the working directory, then `JOKES__*` environment
//! variables (`JOKES__SESSION__SECRET`, `JOKES__SERVER__PORT`, ...).

use common::{
    database::{
        DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_CONNECTIONS,
        DatabaseConfig,
    },
    error::{DatabaseError, DatabaseResult},
};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    /// `host:port` to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Acquire timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseSettings {
    /// Pool configuration; falls back to `DATABASE_URL` when no URL is configured
    pub fn config(&self) -> DatabaseResult<DatabaseConfig> {
        let database_url = self
            .url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| {
                DatabaseError::Configuration(
                    "set JOKES__DATABASE__URL or DATABASE_URL".to_string(),
                )
            })?;

        Ok(DatabaseConfig {
            database_url,
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connection_timeout: self.connection_timeout,
        })
    }
}

/// Session cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Signing secret, at least 32 bytes
    pub secret: String,
    pub cookie_name: String,
    pub max_age_days: i64,
    pub secure: bool,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default `tracing` filter; `RUST_LOG` takes precedence
    pub level: String,
}

/// All service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from defaults, `jokes.toml` and the environment
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("database.min_connections", DEFAULT_MIN_CONNECTIONS)?
            .set_default("database.connection_timeout", DEFAULT_CONNECTION_TIMEOUT)?
            .set_default("session.cookie_name", "jokes_session")?
            .set_default("session.max_age_days", 30)?
            .set_default("session.secure", false)?
            .set_default("log.level", "info")?
            .add_source(
                File::with_name("jokes.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("JOKES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const SECRET: &str = "a-session-secret-that-is-long-enough-to-sign";

    #[test]
    #[serial]
    fn test_settings_defaults() {
        unsafe {
            std::env::set_var("JOKES__SESSION__SECRET", SECRET);
        }

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:3000");
        assert_eq!(settings.database.backend, StorageBackend::Postgres);
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.session.secret, SECRET);
        assert_eq!(settings.session.cookie_name, "jokes_session");
        assert_eq!(settings.session.max_age_days, 30);
        assert!(!settings.session.secure);
        assert_eq!(settings.log.level, "info");

        unsafe {
            std::env::remove_var("JOKES__SESSION__SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_settings_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("JOKES__SESSION__SECRET", SECRET);
            std::env::set_var("JOKES__SERVER__PORT", "8080");
            std::env::set_var("JOKES__DATABASE__BACKEND", "memory");
            std::env::set_var("JOKES__SESSION__SECURE", "true");
        }

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert!(settings.session.secure);

        unsafe {
            std::env::remove_var("JOKES__SESSION__SECRET");
            std::env::remove_var("JOKES__SERVER__PORT");
            std::env::remove_var("JOKES__DATABASE__BACKEND");
            std::env::remove_var("JOKES__SESSION__SECURE");
        }
    }

    #[test]
    #[serial]
    fn test_secret_is_required() {
        unsafe {
            std::env::remove_var("JOKES__SESSION__SECRET");
        }

        assert!(Settings::new().is_err());
    }

    #[test]
    #[serial]
    fn test_database_url_precedence() {
        unsafe {
            std::env::set_var("DATABASE_URL", "postgresql://fallback@localhost/jokes");
        }

        let mut settings = DatabaseSettings {
            backend: StorageBackend::Postgres,
            url: None,
            max_connections: 4,
            min_connections: 1,
            connection_timeout: 5,
        };
        assert_eq!(
            settings.config().unwrap().database_url,
            "postgresql://fallback@localhost/jokes"
        );

        settings.url = Some("postgresql://configured@localhost/jokes".to_string());
        let config = settings.config().unwrap();
        assert_eq!(config.database_url, "postgresql://configured@localhost/jokes");
        assert_eq!(config.max_connections, 4);

        unsafe {
            std::env::remove_var("DATABASE_URL");
        }
    }
}
