use axum::extract::{Path, Query, State};
use dx_core::query::{AlertFilter, Pagination};
use dx_core::types::{Alert, AlertAcknowledgement, AlertEscalation};

use super::{reply, reply_page, Reply, Shared};

pub(crate) async fn list(
    State(state): Shared,
    Query(criteria): Query<AlertFilter>,
    Query(page): Query<Pagination>,
) -> Reply<Vec<Alert>> {
    reply_page(state.backend.list_alerts(&criteria, page).await)
}

pub(crate) async fn get_one(State(state): Shared, Path(id): Path<String>) -> Reply<Alert> {
    reply(state.backend.alert(&id).await)
}

/// POST /api/v1/alerts/{id}/acknowledge
pub(crate) async fn acknowledge(
    State(state): Shared,
    Path(id): Path<String>,
) -> Reply<AlertAcknowledgement> {
    reply(state.backend.acknowledge_alert(&id).await)
}

/// POST /api/v1/alerts/{id}/escalate
pub(crate) async fn escalate(State(state): Shared, Path(id): Path<String>) -> Reply<AlertEscalation> {
    reply(state.backend.escalate_alert(&id).await)
}
