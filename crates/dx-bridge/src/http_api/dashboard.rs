use axum::extract::{Query, State};
use dx_core::types::{ActivityItem, DashboardStat, DashboardSummary, TrendData};
use serde::Deserialize;

use super::{reply, Reply, Shared};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ActivityQuery {
    limit: Option<usize>,
}

pub(crate) async fn summary(State(state): Shared) -> Reply<DashboardSummary> {
    reply(state.backend.dashboard_summary().await)
}

pub(crate) async fn stats(State(state): Shared) -> Reply<Vec<DashboardStat>> {
    reply(state.backend.dashboard_stats().await)
}

/// GET /api/v1/dashboard/activity?limit=N
pub(crate) async fn activity(
    State(state): Shared,
    Query(q): Query<ActivityQuery>,
) -> Reply<Vec<ActivityItem>> {
    reply(state.backend.dashboard_activity(q.limit).await)
}

pub(crate) async fn trends(State(state): Shared) -> Reply<TrendData> {
    reply(state.backend.dashboard_trends().await)
}
