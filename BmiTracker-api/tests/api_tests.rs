use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bmi_tracker_api::api::create_application;
use bmi_tracker_api::config::{AppConfig, Environment, StorageBackend};
use bmi_tracker_data::database::DatabaseConfig;
use serde_json::{json, Value};
use std::sync::Once;
use tower::ServiceExt;

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn config(storage: StorageBackend) -> AppConfig {
    AppConfig {
        storage,
        database: DatabaseConfig::in_memory(),
        environment: Environment::Production,
        ..AppConfig::default()
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
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
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

// Walk through the full record lifecycle against one backend
async fn exercise_record_lifecycle(app: Router) {
    let (status, list) = send(&app, Method::GET, "/api/user/bmi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, first) = send(
        &app,
        Method::POST,
        "/api/create/bmi",
        Some(json!({ "height": 175, "weight": 70, "age": 30, "bmi": 12.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["bmi"], 22.86);

    let (status, second) = send(
        &app,
        Method::POST,
        "/api/create/bmi",
        Some(json!({ "height": 160, "weight": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["category"], "Obese");

    let (_, list) = send(&app, Method::GET, "/api/user/bmi", None).await;
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);
    assert_eq!(list[1]["age"], 30);
    assert_eq!(list[1]["bmi"], 22.86);

    let uri = format!("/api/user/bmi/{}", first["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/api/user/bmi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], 1);

    let (_, list) = send(&app, Method::GET, "/api/user/bmi", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_record_lifecycle_sqlite() {
    initialize();
    let app = create_application(&config(StorageBackend::Sqlite)).unwrap();
    exercise_record_lifecycle(app).await;
}

#[tokio::test]
async fn test_record_lifecycle_in_memory() {
    initialize();
    let app = create_application(&config(StorageBackend::Memory)).unwrap();
    exercise_record_lifecycle(app).await;
}

#[tokio::test]
async fn test_health_reports_sqlite_store() {
    initialize();
    let app = create_application(&config(StorageBackend::Sqlite)).unwrap();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_invalid_input_is_rejected_end_to_end() {
    initialize();
    let app = create_application(&config(StorageBackend::Sqlite)).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/create/bmi",
        Some(json!({ "height": "tall", "weight": 70 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (_, list) = send(&app, Method::GET, "/api/user/bmi", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_static_files_are_served_when_configured() {
    initialize();
    let dir = std::env::temp_dir().join(format!("bmi-tracker-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hello.txt"), "hello").unwrap();

    let app = create_application(&AppConfig {
        static_dir: Some(dir.clone()),
        ..config(StorageBackend::Memory)
    })
    .unwrap();

    let request = Request::builder()
        .uri("/api/public/hello.txt")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"hello");

    std::fs::remove_dir_all(dir).unwrap();
}
