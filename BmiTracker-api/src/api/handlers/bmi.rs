use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

// Import domain entities
use bmi_tracker_domain::entities::bmi::{
    CalculateBmiRequest as DomainCalculateBmiRequest,
    CreateBmiRecordRequest as DomainCreateBmiRecordRequest,
};

// Import our entities
use crate::api::handlers::error::{rejection_response, service_error_response};
use crate::api::state::AppState;
use crate::entities::bmi::{
    BmiAssessmentResponse, BmiRecord, CalculateBmiRequest, CreateBmiRecordRequest,
    DeleteAllBmiRecordsResponse, DeleteBmiRecordResponse,
};
use crate::entities::common::ErrorResponse;

/// List all BMI records, newest first
#[utoipa::path(
    get,
    path = "/api/user/bmi",
    responses(
        (status = 200, description = "All stored BMI records, newest first", body = [BmiRecord]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bmi"
)]
#[instrument(skip(state))]
pub async fn list_bmi_records(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let records = state
        .bmi_service
        .list_records()
        .await
        .map_err(|e| service_error_response(e, state.environment))?;

    info!("Returning {} BMI records", records.len());
    let public_records: Vec<BmiRecord> = records.into_iter().map(BmiRecord::from).collect();
    Ok((StatusCode::OK, Json(public_records)))
}

/// Create a new BMI record; the BMI is always computed by the server
#[utoipa::path(
    post,
    path = "/api/create/bmi",
    request_body = CreateBmiRecordRequest,
    responses(
        (status = 201, description = "BMI record created", body = BmiRecord),
        (status = 400, description = "Missing, non-numeric or implausible measurements", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bmi"
)]
#[instrument(skip(state, payload))]
pub async fn create_bmi_record(
    State(state): State<AppState>,
    payload: Result<Json<CreateBmiRecordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = payload.map_err(rejection_response)?;
    let domain_request = convert_to_domain_create_request(request)?;

    let record = state
        .bmi_service
        .create_record(domain_request)
        .await
        .map_err(|e| service_error_response(e, state.environment))?;

    Ok((StatusCode::CREATED, Json(BmiRecord::from(record))))
}

/// Calculate BMI, category and advice without storing anything
#[utoipa::path(
    post,
    path = "/api/calculate/bmi",
    request_body = CalculateBmiRequest,
    responses(
        (status = 200, description = "BMI calculated", body = BmiAssessmentResponse),
        (status = 400, description = "Missing, non-numeric or implausible measurements", body = ErrorResponse),
    ),
    tag = "bmi"
)]
#[instrument(skip(state, payload))]
pub async fn calculate_bmi(
    State(state): State<AppState>,
    payload: Result<Json<CalculateBmiRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = payload.map_err(rejection_response)?;
    let domain_request = DomainCalculateBmiRequest {
        height: required(request.height, "height")?,
        weight: required(request.weight, "weight")?,
    };

    let assessment = state
        .bmi_service
        .calculate(&domain_request)
        .map_err(|e| service_error_response(e, state.environment))?;

    Ok((StatusCode::OK, Json(BmiAssessmentResponse::from(assessment))))
}

/// Delete a single BMI record
#[utoipa::path(
    delete,
    path = "/api/user/bmi/{id}",
    params(
        ("id" = String, Path, description = "BMI record ID")
    ),
    responses(
        (status = 200, description = "BMI record deleted", body = DeleteBmiRecordResponse),
        (status = 404, description = "BMI record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bmi"
)]
#[instrument(skip(state))]
pub async fn delete_bmi_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    state
        .bmi_service
        .delete_record(&id)
        .await
        .map_err(|e| service_error_response(e, state.environment))?;

    Ok((
        StatusCode::OK,
        Json(DeleteBmiRecordResponse {
            message: "BMI record deleted".to_string(),
        }),
    ))
}

/// Delete every BMI record
#[utoipa::path(
    delete,
    path = "/api/user/bmi",
    responses(
        (status = 200, description = "All BMI records deleted", body = DeleteAllBmiRecordsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "bmi"
)]
#[instrument(skip(state))]
pub async fn delete_all_bmi_records(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let deleted_count = state
        .bmi_service
        .delete_all_records()
        .await
        .map_err(|e| service_error_response(e, state.environment))?;

    Ok((
        StatusCode::OK,
        Json(DeleteAllBmiRecordsResponse {
            message: format!("Deleted {} BMI records", deleted_count),
            deleted_count,
        }),
    ))
}

fn required(value: Option<f64>, field: &str) -> Result<f64, ErrorResponse> {
    value.ok_or_else(|| ErrorResponse::validation_error(&format!("{} is required", field)))
}

/// Convert public request to domain request
fn convert_to_domain_create_request(
    request: CreateBmiRecordRequest,
) -> Result<DomainCreateBmiRecordRequest, ErrorResponse> {
    Ok(DomainCreateBmiRecordRequest {
        height: required(request.height, "height")?,
        weight: required(request.weight, "weight")?,
        age: request.age,
    })
}
