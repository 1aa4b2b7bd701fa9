//! HTTP bridge exposing a Dexter data backend as a REST API.
//!
//! - [`http_api`]: axum router under `/api/v1`, plus `/metrics` and `/health`
//! - [`api_error`]: backend failures as envelope responses with status codes
//! - [`server`]: bind and serve with graceful shutdown

pub mod api_error;
pub mod http_api;
pub mod server;

pub use api_error::BridgeError;
pub use http_api::{api_router, BridgeState};
pub use server::{bind, serve};
