use rusqlite::params;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::bmi_record::BmiRecord;
use super::errors::RepositoryError;

/// Database storage operations for BMI records.
///
/// rusqlite is blocking, so every call checks out a connection inside
/// `spawn_blocking`.
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Store a record in the database
    pub async fn store_record(pool: &DatabasePool, record: &BmiRecord) -> Result<(), RepositoryError> {
        debug!("Storing BMI record in database: id={}", record.id);

        let pool = pool.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || -> Result<(), RepositoryError> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO bmi_records (id, height, weight, age, bmi, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.height,
                    record.weight,
                    record.age,
                    record.bmi,
                    record.created_at,
                ],
            )?;
            Ok(())
        })
        .await?
    }

    /// Get all records from the database, newest first
    pub async fn get_all(pool: &DatabasePool) -> Result<Vec<BmiRecord>, RepositoryError> {
        debug!("Getting all BMI records from database");

        let pool = pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<BmiRecord>, RepositoryError> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT id, height, weight, age, bmi, created_at
                 FROM bmi_records ORDER BY created_at DESC, rowid DESC",
            )?;

            let rows = stmt.query_map([], |row| {
                Ok(BmiRecord {
                    id: row.get(0)?,
                    height: row.get(1)?,
                    weight: row.get(2)?,
                    age: row.get(3)?,
                    bmi: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;

            let mut result = Vec::new();
            for record in rows {
                result.push(record?);
            }
            Ok(result)
        })
        .await?
    }

    /// Delete a record by ID, reporting whether a row was removed
    pub async fn delete_by_id(pool: &DatabasePool, id: &str) -> Result<bool, RepositoryError> {
        debug!("Deleting BMI record from database: id={}", id);

        let pool = pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool, RepositoryError> {
            let conn = pool.get()?;
            let deleted = conn.execute("DELETE FROM bmi_records WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await?
    }

    /// Delete all records, returning the number of rows removed
    pub async fn delete_all(pool: &DatabasePool) -> Result<usize, RepositoryError> {
        debug!("Deleting all BMI records from database");

        let pool = pool.clone();
        tokio::task::spawn_blocking(move || -> Result<usize, RepositoryError> {
            let conn = pool.get()?;
            Ok(conn.execute("DELETE FROM bmi_records", [])?)
        })
        .await?
    }
}
