
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bmi_tracker_domain::health::HealthService as DomainHealthService;

use crate::api::routes::create_app;
use crate::api::state::{AppState, BmiService, HealthService};
use crate::config::{AppConfig, Environment};

/// Router over the given services with default configuration
fn test_app(bmi_service: BmiService, health_service: HealthService, environment: Environment) -> Router {
    let state = AppState::new(bmi_service, health_service, environment);
    create_app(state, &AppConfig::default())
}

/// Router over mock services with the given configuration
fn app_with_config(config: &AppConfig) -> Router {
    let state = AppState::new(
        bmi_tracker_domain::testing::create_mock_bmi_record_service(),
        Arc::new(DomainHealthService::new(None)),
        config.environment,
    );
    create_app(state, config)
}

/// Router over the given BMI service and an in-memory health report
fn app_with_service(bmi_service: BmiService, environment: Environment) -> Router {
    test_app(bmi_service, Arc::new(DomainHealthService::new(None)), environment)
}

/// Send a request and decode the JSON body; an empty or non-JSON body becomes `Value::Null`
async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}
