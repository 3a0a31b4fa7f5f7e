use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::api::handlers::{self, bmi, health};
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Prefix for the BMI endpoints
pub const API_PREFIX: &str = "/api";

/// Create the application router
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/user/bmi", get(bmi::list_bmi_records).delete(bmi::delete_all_bmi_records))
        .route("/user/bmi/:id", delete(bmi::delete_bmi_record))
        .route("/create/bmi", post(bmi::create_bmi_record))
        .route("/calculate/bmi", post(bmi::calculate_bmi));

    debug!("API routes configured");

    let mut app = Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api_routes)
        .fallback(handlers::endpoint_not_found)
        .with_state(state);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {} at {}/public", static_dir.display(), API_PREFIX);
        app = app.nest_service(&format!("{}/public", API_PREFIX), ServeDir::new(static_dir));
    }

    // Configure the Swagger UI
    let app = app.merge(configure_swagger_routes());

    debug!("Swagger UI merged");

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    app.layer(cors_layer(&config.cors_allowed_origins))
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer; an empty origin list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
