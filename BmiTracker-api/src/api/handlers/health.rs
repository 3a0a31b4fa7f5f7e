use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use bmi_tracker_domain::health::{HealthComponent, HealthStatus};

use crate::api::routes::API_PREFIX;
use crate::api::state::AppState;

/// Health report for the service
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok", "degraded" or "error"
    pub status: String,
    /// Application version from the Cargo manifest
    pub version: String,
    /// Unix timestamp of the report
    pub timestamp: i64,
    /// Seconds since the router was built
    pub uptime: u64,
    pub components: ComponentReports,
    pub environment: String,
}

/// Per-component health
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentReports {
    /// Record store
    pub database: ComponentReport,
    pub api: ComponentReport,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentReport {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<HealthComponent> for ComponentReport {
    fn from(component: HealthComponent) -> Self {
        Self {
            status: component.status.as_str().to_string(),
            message: component.details,
        }
    }
}

/// Service banner returned at the root path
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
    /// Prefix under which the BMI endpoints are mounted
    pub api_prefix: String,
    pub environment: String,
}

/// Report service and record store health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.health_service.get_system_health().await;
    info!("Health check: {}", health.status.as_str());

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let response = HealthResponse {
        status: health.status.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().timestamp(),
        uptime: state.started_at.elapsed().as_secs(),
        components: ComponentReports {
            database: health.database.into(),
            api: health.api.into(),
        },
        environment: state.environment.as_str().to_string(),
    };

    (status_code, Json(response))
}

/// Root endpoint describing the service
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = ServiceInfo)
    ),
    tag = "health"
)]
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "BMI Tracker API is running".to_string(),
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_prefix: API_PREFIX.to_string(),
        environment: state.environment.as_str().to_string(),
    })
}
