use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use dx_backend::{DataBackend, MockBackend};
use dx_bridge::api_router;
use dx_core::dataset::Dataset;
use dx_harness::fault::AlwaysFail;
use dx_harness::latency::DelaySimulator;
use dx_harness::Simulator;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> axum::Router {
    let backend: Arc<dyn DataBackend> =
        Arc::new(MockBackend::instant(Arc::new(Dataset::seed().unwrap())));
    api_router(backend)
}

fn failing_app() -> axum::Router {
    let backend: Arc<dyn DataBackend> = Arc::new(MockBackend::new(
        Arc::new(Dataset::seed().unwrap()),
        Simulator::new(DelaySimulator::instant(), Arc::new(AlwaysFail)),
    ));
    api_router(backend)
}

async fn call(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn list_narratives_with_filter_and_page() {
    let (status, json) = call(
        app(),
        "GET",
        "/api/v1/narratives?platform=whatsapp&page=1&perPage=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["meta"], json!({"total": 3, "page": 1, "perPage": 2}));
}

#[tokio::test]
async fn actor_type_filter_uses_wire_key() {
    let (_, json) = call(app(), "GET", "/api/v1/actors?type=NETWORK", None).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["4"]);
}

#[tokio::test]
async fn missing_alert_is_404_envelope() {
    let (status, json) = call(app(), "GET", "/api/v1/alerts/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Alert not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn bad_login_is_401() {
    let (status, json) = call(
        app(),
        "POST",
        "/api/v1/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn injected_fault_is_503() {
    let (status, json) = call(failing_app(), "GET", "/api/v1/dashboard/trends", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "Failed to fetch trend data");
    assert_eq!(json["code"], "TRANSIENT");
}

#[tokio::test]
async fn escalate_returns_critical() {
    let (status, json) = call(app(), "POST", "/api/v1/alerts/3/escalate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({"id": "3", "escalated": true, "severity": "CRITICAL"})
    );
}

#[tokio::test]
async fn create_report_applies_request_defaults() {
    let (status, json) = call(
        app(),
        "POST",
        "/api/v1/reports",
        Some(json!({"title": "Quick look", "type": "summary", "includeCharts": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["type"], "Executive Summary");
    assert_eq!(data["visualizations"], json!([]));
    assert_eq!(data["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn export_format_is_validated() {
    let (status, json) = call(app(), "GET", "/api/v1/reports/1/export?format=docx", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["url"], "https://example.com/reports/1.docx");

    let (status, _) = call(app(), "GET", "/api/v1/reports/1/export?format=gif", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = call(app(), "GET", "/api/v1/reports/1/export", None).await;
    assert_eq!(json["data"]["format"], "pdf");
}

#[tokio::test]
async fn logout_has_no_payload() {
    let (status, json) = call(app(), "POST", "/api/v1/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true}));
}

#[tokio::test]
async fn health_reports_mode_and_request_id_is_set() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["mode"], "mock");
}

#[tokio::test]
async fn metrics_endpoint_is_prometheus_text() {
    let app = app();
    call(app.clone(), "GET", "/api/v1/lexicon", None).await;
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(req).await.unwrap();
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("backend_requests_total"));
}
