use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::service_info,

        // BMI endpoints
        crate::api::handlers::bmi::list_bmi_records,
        crate::api::handlers::bmi::create_bmi_record,
        crate::api::handlers::bmi::calculate_bmi,
        crate::api::handlers::bmi::delete_bmi_record,
        crate::api::handlers::bmi::delete_all_bmi_records
    ),
    components(
        schemas(
            // Entities
            crate::entities::bmi::BmiRecord,
            crate::entities::bmi::CreateBmiRecordRequest,
            crate::entities::bmi::CalculateBmiRequest,
            crate::entities::bmi::BmiAssessmentResponse,
            crate::entities::bmi::DeleteBmiRecordResponse,
            crate::entities::bmi::DeleteAllBmiRecordsResponse,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentReports,
            crate::api::handlers::health::ComponentReport,
            crate::api::handlers::health::ServiceInfo
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bmi", description = "BMI calculation and record management endpoints")
    ),
    info(
        title = "BMI Tracker API",
        version = "0.1.0",
        description = "API for calculating BMI and keeping a history of measurements",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
