pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use bmi_tracker_data::database::{initialize_database_pool, DatabaseError};
use bmi_tracker_data::repository::BmiRecordRepository;
use bmi_tracker_domain::health::HealthService;
use bmi_tracker_domain::services::create_bmi_record_service;

use crate::config::{AppConfig, StorageBackend};
pub use state::AppState;

/// Wire the repository and services selected by the configuration.
///
/// A SQLite store that cannot be opened or migrated is a startup error.
pub fn build_state(config: &AppConfig) -> Result<AppState, DatabaseError> {
    let repository = match config.storage {
        StorageBackend::Sqlite => {
            let pool = initialize_database_pool(&config.database)?;
            info!("Using SQLite record store: {}", pool.connection_info());
            BmiRecordRepository::with_pool(pool)
        }
        StorageBackend::Memory => {
            info!("Using in-memory record store; records are lost on restart");
            BmiRecordRepository::in_memory()
        }
    };
    let health_service = HealthService::new(repository.pool().cloned());

    Ok(AppState::new(
        Arc::new(create_bmi_record_service(repository)),
        Arc::new(health_service),
        config.environment,
    ))
}

/// Create the application router
pub fn create_application(config: &AppConfig) -> Result<Router, DatabaseError> {
    let state = build_state(config)?;
    Ok(routes::create_app(state, config))
}
