use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::{global_metrics, HTTP_DURATION, HTTP_IN_FLIGHT, HTTP_REQUESTS};

/// Route label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Axum middleware that records request metrics into [`global_metrics`].
///
/// The `route` label is the matched route template (`/api/v1/alerts/{id}`),
/// or [`UNMATCHED_ROUTE`] when no route matched.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let start = Instant::now();

    let m = global_metrics();
    m.add_gauge(HTTP_IN_FLIGHT, 1);
    let response = next.run(request).await;
    m.add_gauge(HTTP_IN_FLIGHT, -1);

    let status = response.status().as_u16().to_string();
    m.increment_counter(
        HTTP_REQUESTS,
        &[("method", &method), ("route", &route), ("status", &status)],
    );
    m.record_histogram(HTTP_DURATION, start.elapsed().as_secs_f64());

    response
}
