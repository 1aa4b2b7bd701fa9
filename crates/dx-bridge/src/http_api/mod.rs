//! REST surface over a [`DataBackend`], mounted at `/api/v1`.

mod actors;
mod alerts;
mod auth;
mod dashboard;
mod lexicon;
mod metrics;
mod narratives;
mod reports;
mod timeline;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use dx_api_types::{ApiResult, Envelope, Page};
use dx_backend::DataBackend;
use dx_telemetry::middleware::metrics_middleware;
use dx_telemetry::tracing_setup::request_id_middleware;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api_error::BridgeError;

/// Shared state for all handlers.
pub struct BridgeState {
    pub backend: Arc<dyn DataBackend>,
}

impl BridgeState {
    pub fn new(backend: Arc<dyn DataBackend>) -> Self {
        Self { backend }
    }
}

pub(crate) type Shared = axum::extract::State<Arc<BridgeState>>;

pub(crate) type Reply<T> = Result<Json<Envelope<T>>, BridgeError>;

pub(crate) fn reply<T>(result: ApiResult<T>) -> Reply<T> {
    Ok(Json(Envelope::ok(result?)))
}

pub(crate) fn reply_page<T>(result: ApiResult<Page<T>>) -> Reply<Vec<T>> {
    Ok(Json(Envelope::page(result?)))
}

/// Routes mirror the paths `HttpBackend` calls, one per backend operation.
pub fn api_routes() -> Router<Arc<BridgeState>> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/profile", get(auth::profile))
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/activity", get(dashboard::activity))
        .route("/dashboard/trends", get(dashboard::trends))
        .route(
            "/narratives",
            get(narratives::list).post(narratives::create),
        )
        .route(
            "/narratives/{id}",
            get(narratives::get_one)
                .put(narratives::update)
                .delete(narratives::remove),
        )
        .route("/narratives/{id}/related", get(narratives::related))
        .route("/narratives/{id}/timeline", get(narratives::timeline))
        .route("/actors", get(actors::list))
        .route("/actors/{id}", get(actors::get_one))
        .route("/actors/{id}/network", get(actors::network))
        .route("/actors/{id}/activity", get(actors::activity))
        .route("/alerts", get(alerts::list))
        .route("/alerts/{id}", get(alerts::get_one))
        .route("/alerts/{id}/acknowledge", post(alerts::acknowledge))
        .route("/alerts/{id}/escalate", post(alerts::escalate))
        .route("/timeline", get(timeline::list))
        .route("/reports", get(reports::list).post(reports::create))
        .route("/reports/{id}", get(reports::get_one))
        .route("/reports/{id}/export", get(reports::export))
        .route("/lexicon", get(lexicon::list))
        .route("/lexicon/{language}", get(lexicon::terms))
}

/// Full application router: API, metrics, health, and middleware.
pub fn api_router(backend: Arc<dyn DataBackend>) -> Router {
    let state = Arc::new(BridgeState::new(backend));
    Router::new()
        .nest("/api/v1", api_routes())
        .route("/health", get(metrics::health))
        .route("/metrics", get(metrics::prometheus))
        .route("/metrics/json", get(metrics::json))
        .with_state(state)
        .layer(axum_middleware::from_fn(metrics_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::very_permissive())
}
