use rusqlite::Connection;
use tracing::info;

use crate::database::DatabaseError;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_bmi_records_table(conn)?;
    create_bmi_records_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the BMI records table
fn create_bmi_records_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating bmi_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS bmi_records (
            id TEXT PRIMARY KEY,
            height REAL NOT NULL,
            weight REAL NOT NULL,
            age INTEGER,
            bmi REAL NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| DatabaseError::Migration(e.to_string()))?;

    Ok(())
}

/// Create index on created_at for the newest-first listing
fn create_bmi_records_index(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating index on created_at");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_bmi_records_created_at
        ON bmi_records (created_at DESC)",
        [],
    ).map_err(|e| DatabaseError::Migration(format!("Failed to create index: {}", e)))?;

    Ok(())
}
