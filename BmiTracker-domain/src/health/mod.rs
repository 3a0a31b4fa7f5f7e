//! Health reporting for the record store and the API process

use async_trait::async_trait;
use bmi_tracker_data::database::DatabasePool;
use tracing::warn;

/// Status of the system or of one component, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    Healthy,
    /// Working, with reduced performance
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Label used in health responses
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "ok",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "error",
        }
    }
}

/// Status of one component with optional details
#[derive(Debug, Clone, PartialEq)]
pub struct HealthComponent {
    pub status: HealthStatus,
    pub details: Option<String>,
}

impl HealthComponent {
    pub fn healthy(details: Option<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            details,
        }
    }

    pub fn unhealthy(details: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            details: Some(details.into()),
        }
    }
}

/// Health of the whole system
#[derive(Debug, Clone, PartialEq)]
pub struct SystemHealth {
    /// Worst status among the components
    pub status: HealthStatus,
    /// Record store
    pub database: HealthComponent,
    pub api: HealthComponent,
}

impl SystemHealth {
    pub fn new(database: HealthComponent, api: HealthComponent) -> Self {
        Self {
            status: database.status.max(api.status),
            database,
            api,
        }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Check the record store.
///
/// Without a pool the records live in process memory, which is always available.
/// A saturated pool is reported as degraded without waiting for a connection.
pub fn check_database_status(pool: Option<&DatabasePool>) -> HealthComponent {
    match pool {
        Some(pool) if pool.is_saturated() => {
            warn!("Database pool has no free connections");
            HealthComponent {
                status: HealthStatus::Degraded,
                details: Some(format!("No free connections: {}", pool.connection_info())),
            }
        }
        Some(pool) => match pool.ping() {
            Ok(()) => HealthComponent::healthy(Some(pool.connection_info())),
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthComponent::unhealthy("Database connection failed")
            }
        },
        None => HealthComponent::healthy(Some("In-memory record store".to_string())),
    }
}

/// Health service checking the record store
#[derive(Debug, Clone, Default)]
pub struct HealthService {
    pool: Option<DatabasePool>,
}

impl HealthService {
    /// Create a health service; pass the pool when records are stored in SQLite
    pub fn new(pool: Option<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        // ping blocks on the pool; keep it off the async workers
        let pool = self.pool.clone();
        let database = tokio::task::spawn_blocking(move || check_database_status(pool.as_ref()))
            .await
            .unwrap_or_else(|e| HealthComponent::unhealthy(format!("Health check task failed: {}", e)));

        SystemHealth::new(database, HealthComponent::healthy(None))
    }
}
