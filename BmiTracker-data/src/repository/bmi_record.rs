use async_trait::async_trait;
use tracing::{debug, error};

use crate::database::DatabasePool;
use crate::models::bmi_record::BmiRecord;
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::DatabaseStorage;

/// Repository trait for BMI records
#[async_trait]
pub trait BmiRecordRepositoryTrait {
    /// Persist a fully built record
    async fn insert(&self, record: BmiRecord) -> Result<BmiRecord, RepositoryError>;

    /// Get all records, newest first
    async fn get_all(&self) -> Result<Vec<BmiRecord>, RepositoryError>;

    /// Delete a record by ID. Returns `false` when no record had that ID.
    async fn delete_by_id(&self, id: &str) -> Result<bool, RepositoryError>;

    /// Delete all records, returning how many were removed
    async fn delete_all(&self) -> Result<usize, RepositoryError>;
}

/// Where a repository keeps its records
#[derive(Debug, Clone)]
enum Backend {
    Database(DatabasePool),
    InMemory(InMemoryStorage),
}

/// Repository for BMI records, backed by SQLite or by process memory
#[derive(Debug, Clone)]
pub struct BmiRecordRepository {
    backend: Backend,
}

impl BmiRecordRepository {
    /// Create a repository over an initialized database pool
    pub fn with_pool(pool: DatabasePool) -> Self {
        Self {
            backend: Backend::Database(pool),
        }
    }

    /// Create a repository that keeps records in memory only
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::InMemory(InMemoryStorage::new()),
        }
    }

    /// The database pool, if this repository is database backed
    pub fn pool(&self) -> Option<&DatabasePool> {
        match &self.backend {
            Backend::Database(pool) => Some(pool),
            Backend::InMemory(_) => None,
        }
    }
}

#[async_trait]
impl BmiRecordRepositoryTrait for BmiRecordRepository {
    async fn insert(&self, record: BmiRecord) -> Result<BmiRecord, RepositoryError> {
        match &self.backend {
            Backend::Database(pool) => {
                debug!("Storing BMI record in database: {}", record.id);
                DatabaseStorage::store_record(pool, &record).await.map_err(|e| {
                    error!("Failed to store record in database: {}", e);
                    e
                })?;
            }
            Backend::InMemory(storage) => storage.store_record(&record).await?,
        }
        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<BmiRecord>, RepositoryError> {
        match &self.backend {
            Backend::Database(pool) => DatabaseStorage::get_all(pool).await.map_err(|e| {
                error!("Failed to get records from database: {}", e);
                e
            }),
            Backend::InMemory(storage) => storage.get_all().await,
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
        match &self.backend {
            Backend::Database(pool) => DatabaseStorage::delete_by_id(pool, id).await.map_err(|e| {
                error!("Failed to delete record {} from database: {}", id, e);
                e
            }),
            Backend::InMemory(storage) => storage.delete_by_id(id).await,
        }
    }

    async fn delete_all(&self) -> Result<usize, RepositoryError> {
        match &self.backend {
            Backend::Database(pool) => DatabaseStorage::delete_all(pool).await.map_err(|e| {
                error!("Failed to delete records from database: {}", e);
                e
            }),
            Backend::InMemory(storage) => storage.delete_all().await,
        }
    }
}

/// Mock BMI record repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Repository double that delegates to in-memory storage unless told to fail
    #[derive(Debug, Clone, Default)]
    pub struct MockBmiRecordRepository {
        storage: InMemoryStorage,
        fail: bool,
    }

    impl MockBmiRecordRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository whose every call fails
        pub fn failing() -> Self {
            Self {
                storage: InMemoryStorage::new(),
                fail: true,
            }
        }

        fn check(&self) -> Result<(), RepositoryError> {
            if self.fail {
                Err(RepositoryError::Unavailable(
                    "mock repository is configured to fail".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl BmiRecordRepositoryTrait for MockBmiRecordRepository {
        async fn insert(&self, record: BmiRecord) -> Result<BmiRecord, RepositoryError> {
            self.check()?;
            self.storage.store_record(&record).await?;
            Ok(record)
        }

        async fn get_all(&self) -> Result<Vec<BmiRecord>, RepositoryError> {
            self.check()?;
            self.storage.get_all().await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, RepositoryError> {
            self.check()?;
            self.storage.delete_by_id(id).await
        }

        async fn delete_all(&self) -> Result<usize, RepositoryError> {
            self.check()?;
            self.storage.delete_all().await
        }
    }
}
