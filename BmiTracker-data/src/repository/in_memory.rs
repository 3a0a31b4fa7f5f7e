use std::sync::{Arc, Mutex};

use crate::models::bmi_record::BmiRecord;
use super::errors::RepositoryError;

/// In-memory storage implementation for BMI records
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    /// Records in insertion order
    records: Arc<Mutex<Vec<BmiRecord>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record in memory
    pub async fn store_record(&self, record: &BmiRecord) -> Result<(), RepositoryError> {
        let mut store = self.records.lock()?;
        store.push(record.clone());
        Ok(())
    }

    /// Get all records, newest first. Records with equal timestamps keep
    /// reverse insertion order.
    pub async fn get_all(&self) -> Result<Vec<BmiRecord>, RepositoryError> {
        let store = self.records.lock()?;

        let mut records: Vec<BmiRecord> = store.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }

    /// Delete a record by ID, reporting whether it existed
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut store = self.records.lock()?;
        let before = store.len();
        store.retain(|record| record.id != id);
        Ok(store.len() < before)
    }

    /// Delete every record, returning how many were removed
    pub async fn delete_all(&self) -> Result<usize, RepositoryError> {
        let mut store = self.records.lock()?;
        let count = store.len();
        store.clear();
        Ok(count)
    }
}
