use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use dx_telemetry::metrics::global_metrics;

use super::Shared;

/// GET /metrics -- Prometheus text format.
pub(crate) async fn prometheus() -> impl IntoResponse {
    let body = global_metrics().export_prometheus();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

/// GET /metrics/json
pub(crate) async fn json() -> impl IntoResponse {
    Json(global_metrics().export_json())
}

/// GET /health -- liveness plus the active backend mode.
pub(crate) async fn health(State(state): Shared) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "mode": state.backend.mode().to_string(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
