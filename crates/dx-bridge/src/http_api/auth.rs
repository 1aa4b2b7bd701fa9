use axum::{extract::State, Json};
use dx_api_types::Envelope;
use dx_core::types::{Credentials, LoginGrant, User};

use super::{reply, Reply, Shared};

/// POST /api/v1/auth/login
pub(crate) async fn login(State(state): Shared, Json(credentials): Json<Credentials>) -> Reply<LoginGrant> {
    reply(state.backend.login(&credentials).await)
}

/// POST /api/v1/auth/logout
pub(crate) async fn logout(State(state): Shared) -> Reply<serde_json::Value> {
    state.backend.logout().await?;
    Ok(Json(Envelope::empty()))
}

/// GET /api/v1/auth/profile
pub(crate) async fn profile(State(state): Shared) -> Reply<User> {
    reply(state.backend.profile().await)
}
