use axum::extract::{Query, State};
use dx_core::query::TimelineFilter;
use dx_core::types::TimelineView;

use super::{reply, Reply, Shared};

/// GET /api/v1/timeline?start=&end=&narrativeId=&platform=
pub(crate) async fn list(
    State(state): Shared,
    Query(criteria): Query<TimelineFilter>,
) -> Reply<TimelineView> {
    reply(state.backend.timeline(&criteria).await)
}
