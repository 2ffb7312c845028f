// ABOUTME: Environment-variable configuration for the Ladle server
// ABOUTME: Typed port, database, JWT secret, and media directory settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Project

//! Typed server configuration loaded from environment variables.

use crate::constants::{defaults, env_names};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Log level setting carried in the server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse leniently; anything unrecognized falls back to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment the server believes it is running in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse leniently; anything unrecognized falls back to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Where the SQLite database lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// On-disk database file
    SQLite { path: PathBuf },
    /// In-memory database, used by the test suites
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL; a bare path is treated as a SQLite file
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        match s.strip_prefix("sqlite:") {
            Some(":memory:") => Self::Memory,
            Some(path) => Self::SQLite {
                path: PathBuf::from(path),
            },
            None => Self::SQLite {
                path: PathBuf::from(s),
            },
        }
    }

    /// Connection string handed to the sqlx pool
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// Whether this database is in-memory
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for validating externally issued JWTs
    pub jwt_secret: String,
}

/// Media storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root directory for stored recipe images
    pub directory: PathBuf,
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database: DatabaseUrl,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Media storage settings
    pub media: MediaConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default except `JWT_SECRET`, which must be set:
    /// without the identity service's shared secret no request could ever
    /// authenticate.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is unset or a supplied value fails
    /// to parse (e.g. a non-numeric `HTTP_PORT`).
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var(env_names::HTTP_PORT) {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid {} value: {value}", env_names::HTTP_PORT))?,
            Err(_) => defaults::HTTP_PORT,
        };

        let jwt_secret = env::var(env_names::JWT_SECRET).with_context(|| {
            format!(
                "{} must be set (shared secret of the identity service)",
                env_names::JWT_SECRET
            )
        })?;

        Ok(Self {
            http_port,
            log_level: env::var("RUST_LOG")
                .map_or_else(|_| LogLevel::default(), |s| LogLevel::from_str_or_default(&s)),
            environment: env::var(env_names::ENVIRONMENT).map_or_else(
                |_| Environment::default(),
                |s| Environment::from_str_or_default(&s),
            ),
            database: env::var(env_names::DATABASE_URL)
                .map_or_else(|_| DatabaseUrl::default(), |url| DatabaseUrl::parse_url(&url)),
            auth: AuthConfig { jwt_secret },
            media: MediaConfig {
                directory: env::var(env_names::MEDIA_DIR)
                    .map_or_else(|_| PathBuf::from(defaults::MEDIA_DIR), PathBuf::from),
            },
        })
    }

    /// Human-readable startup summary (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Ladle Server Configuration:\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Media Directory: {}",
            self.http_port,
            self.log_level,
            self.environment,
            self.database,
            self.media.directory.display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/ladle.db").to_connection_string(),
            "sqlite:./data/ladle.db"
        );
        // Bare paths fall back to SQLite
        assert_eq!(
            DatabaseUrl::parse_url("/tmp/ladle.db").to_connection_string(),
            "sqlite:/tmp/ladle.db"
        );
    }

    #[test]
    fn test_log_level_fallback() {
        assert_eq!(LogLevel::from_str_or_default("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("prod"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("dev"), Environment::Development);
    }

    #[test]
    #[serial]
    fn test_from_env_requires_jwt_secret() {
        std::env::remove_var(env_names::JWT_SECRET);
        assert!(ServerConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_with_overrides() {
        std::env::set_var(env_names::JWT_SECRET, "test-secret");
        std::env::set_var(env_names::HTTP_PORT, "9090");
        std::env::set_var(env_names::DATABASE_URL, "sqlite::memory:");

        let config = ServerConfig::from_env().expect("config should load");
        assert_eq!(config.http_port, 9090);
        assert!(config.database.is_memory());
        assert_eq!(config.auth.jwt_secret, "test-secret");

        std::env::remove_var(env_names::JWT_SECRET);
        std::env::remove_var(env_names::HTTP_PORT);
        std::env::remove_var(env_names::DATABASE_URL);
    }
}
