use axum::{
    extract::rejection::JsonRejection,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use bmi_tracker_domain::services::BmiServiceError;

use crate::config::Environment;
use crate::entities::common::ErrorResponse;

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Map a service error to the public error body.
///
/// Store failures never expose their cause outside development.
pub fn service_error_response(err: BmiServiceError, environment: Environment) -> ErrorResponse {
    match err {
        BmiServiceError::InvalidMeasurement(message) => {
            warn!("Invalid BMI measurement: {}", message);
            ErrorResponse::validation_error(&message)
        }
        BmiServiceError::NotFound(message) => {
            debug!("{}", message);
            ErrorResponse::not_found(&message)
        }
        BmiServiceError::StoreUnavailable(cause) => {
            error!("Record store unavailable: {}", cause);
            let details = if environment.is_production() { None } else { Some(cause) };
            ErrorResponse::internal_error(details)
        }
    }
}

/// Malformed, non-JSON or mistyped bodies are client errors
pub fn rejection_response(rejection: JsonRejection) -> ErrorResponse {
    warn!("Rejected request body: {}", rejection.body_text());
    ErrorResponse::validation_error(&rejection.body_text())
}

/// Fallback for unknown routes
pub async fn endpoint_not_found(uri: Uri) -> ErrorResponse {
    debug!("No route for {}", uri);
    ErrorResponse::not_found("Endpoint not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ErrorResponse::validation_error("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorResponse::not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorResponse::internal_error(None).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_failure_hides_cause_in_production() {
        let err = || BmiServiceError::StoreUnavailable("disk I/O error".to_string());

        let production = service_error_response(err(), Environment::Production);
        assert_eq!(production.message, "Internal error");
        assert_eq!(production.details, None);

        let development = service_error_response(err(), Environment::Development);
        assert_eq!(development.message, "Internal error");
        assert_eq!(development.details.as_deref(), Some("disk I/O error"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let response = service_error_response(
            BmiServiceError::InvalidMeasurement("height must be a finite number".to_string()),
            Environment::Production,
        );
        assert_eq!(response.error, "validation_error");
        assert_eq!(response.message, "height must be a finite number");

        let response = service_error_response(
            BmiServiceError::NotFound("BMI record with ID x not found".to_string()),
            Environment::Production,
        );
        assert_eq!(response.error, "not_found");
    }
}
