use std::sync::Arc;
use std::time::Instant;

use bmi_tracker_domain::health::HealthServiceTrait;
use bmi_tracker_domain::services::BmiRecordServiceTrait;

use crate::config::Environment;

/// Service type for dependency injection
pub type BmiService = Arc<dyn BmiRecordServiceTrait + Send + Sync>;

/// Health service type for dependency injection
pub type HealthService = Arc<dyn HealthServiceTrait>;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub bmi_service: BmiService,
    pub health_service: HealthService,
    pub environment: Environment,
    /// Used for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    pub fn new(bmi_service: BmiService, health_service: HealthService, environment: Environment) -> Self {
        Self {
            bmi_service,
            health_service,
            environment,
            started_at: Instant::now(),
        }
    }
}
