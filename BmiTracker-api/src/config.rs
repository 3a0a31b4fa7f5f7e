//! Application configuration read from the environment.
//!
//! `.env` loading happens in the binary; this module only reads variables.

use std::env;
use std::path::PathBuf;

use bmi_tracker_data::database::{DatabaseConfig, DatabaseError};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable has a value that cannot be used
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// Database settings are invalid
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Deployment environment, controls how much error detail reaches clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse an `APP_ENV` value; anything but production means development
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// Where BMI records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// SQLite through a connection pool
    #[default]
    Sqlite,
    /// Process memory; records are lost on restart
    Memory,
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// TCP port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Record storage backend
    pub storage: StorageBackend,
    /// SQLite settings, used when `storage` is `Sqlite`
    pub database: DatabaseConfig,
    /// Directory served under `/api/public`, if any
    pub static_dir: Option<PathBuf>,
    /// Allowed CORS origins; empty allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: Environment::default(),
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
            static_dir: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => 3000,
        };

        let environment = lookup("APP_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let storage = match lookup("STORAGE_BACKEND") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "sqlite" => StorageBackend::Sqlite,
                "memory" => StorageBackend::Memory,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "STORAGE_BACKEND",
                        value: raw,
                    })
                }
            },
            None => StorageBackend::Sqlite,
        };

        let database = DatabaseConfig::from_lookup(&lookup)?;

        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            environment,
            storage,
            database,
            static_dir,
            cors_allowed_origins,
        })
    }
}
