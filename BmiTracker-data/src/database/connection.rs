//! Database connection module for the BMI Tracker application
//!
//! Builds an `r2d2` pool of SQLite connections, either backed by a file or by a
//! private in-memory database, and runs the schema migrations on it. The pool is
//! returned to the caller; nothing here is stored globally.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{debug, info};

use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Path value that selects an in-memory SQLite database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Database configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Path to SQLite database file, or `:memory:`
    pub sqlite_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "data/bmi_tracker.db".to_string(),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            sqlite_path: IN_MEMORY_PATH.to_string(),
            ..Self::default()
        }
    }

    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a configuration from an arbitrary key lookup.
    ///
    /// Reads `DB_SQLITE_PATH`, `DB_MAX_CONNECTIONS` and `DB_TIMEOUT_SECONDS`;
    /// missing keys fall back to the defaults, unparsable numbers are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatabaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sqlite_path = lookup("DB_SQLITE_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(defaults.sqlite_path);

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => parse_positive("DB_MAX_CONNECTIONS", &raw)? as u32,
            None => defaults.max_connections,
        };

        let timeout_seconds = match lookup("DB_TIMEOUT_SECONDS") {
            Some(raw) => parse_positive("DB_TIMEOUT_SECONDS", &raw)?,
            None => defaults.timeout_seconds,
        };

        info!(
            "Database configuration: path={}, max_connections={}, timeout={}s",
            sqlite_path, max_connections, timeout_seconds
        );

        Ok(Self {
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }

    /// Whether this configuration selects an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.sqlite_path == IN_MEMORY_PATH
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, DatabaseError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 && value <= u32::MAX as u64 => Ok(value),
        _ => Err(DatabaseError::Config(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}

/// Pool of SQLite connections with the schema already migrated
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: r2d2::Pool<SqliteConnectionManager>,
    location: String,
}

impl DatabasePool {
    /// Check out a connection from the pool
    pub fn get(&self) -> Result<PooledConnection<SqliteConnectionManager>, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Run a trivial query to confirm the database answers
    pub fn ping(&self) -> Result<(), DatabaseError> {
        let conn = self.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Whether every connection is checked out and the pool cannot grow
    pub fn is_saturated(&self) -> bool {
        let state = self.pool.state();
        state.idle_connections == 0 && state.connections >= self.pool.max_size()
    }

    /// Human-readable description of the database and pool state
    pub fn connection_info(&self) -> String {
        let state = self.pool.state();
        format!(
            "SQLite database at {} (connections: active={}, idle={})",
            self.location, state.connections, state.idle_connections
        )
    }
}

/// Initialize the database connection pool and run migrations
pub fn initialize_database_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let pool = if config.is_in_memory() {
        initialize_in_memory_pool(config)?
    } else {
        initialize_file_pool(config)?
    };

    info!("Running database migrations");
    {
        let conn = pool.get()?;
        run_sqlite_migrations(&conn)?;
    }
    info!("Database migrations completed successfully");

    Ok(pool)
}

/// Initialize a pool over a database file, creating its directory if needed
fn initialize_file_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing SQLite database at: {}", config.sqlite_path);

    if let Some(parent) = Path::new(&config.sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(&config.sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    debug!("SQLite connection pool created successfully");
    Ok(DatabasePool {
        pool,
        location: config.sqlite_path.clone(),
    })
}

/// Initialize an in-memory database.
///
/// Every SQLite in-memory connection is its own database, so the pool holds a
/// single connection that is never recycled.
fn initialize_in_memory_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let manager = SqliteConnectionManager::memory();

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    Ok(DatabasePool {
        pool,
        location: IN_MEMORY_PATH.to_string(),
    })
}
