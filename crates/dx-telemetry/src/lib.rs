//! Observability for Dexter services.
//!
//! - **Logging**: human-readable or JSON output via `tracing-subscriber`
//! - **Metrics**: counters, gauges and histograms with Prometheus export
//! - **Middleware**: axum layers for request metrics and request-id spans

pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod tracing_setup;
