use axum::extract::{Path, Query, State};
use axum::Json;
use dx_core::query::{NarrativeFilter, Pagination};
use dx_core::types::{Deleted, Narrative, NarrativeDraft, NarrativePatch, TimelineEvent};

use super::{reply, reply_page, Reply, Shared};

/// GET /api/v1/narratives?category=&language=&platform=&search=&page=&perPage=
pub(crate) async fn list(
    State(state): Shared,
    Query(criteria): Query<NarrativeFilter>,
    Query(page): Query<Pagination>,
) -> Reply<Vec<Narrative>> {
    reply_page(state.backend.list_narratives(&criteria, page).await)
}

pub(crate) async fn get_one(State(state): Shared, Path(id): Path<String>) -> Reply<Narrative> {
    reply(state.backend.narrative(&id).await)
}

pub(crate) async fn related(State(state): Shared, Path(id): Path<String>) -> Reply<Vec<Narrative>> {
    reply(state.backend.related_narratives(&id).await)
}

pub(crate) async fn timeline(
    State(state): Shared,
    Path(id): Path<String>,
) -> Reply<Vec<TimelineEvent>> {
    reply(state.backend.narrative_timeline(&id).await)
}

pub(crate) async fn create(State(state): Shared, Json(draft): Json<NarrativeDraft>) -> Reply<Narrative> {
    reply(state.backend.create_narrative(&draft).await)
}

pub(crate) async fn update(
    State(state): Shared,
    Path(id): Path<String>,
    Json(patch): Json<NarrativePatch>,
) -> Reply<Narrative> {
    reply(state.backend.update_narrative(&id, &patch).await)
}

pub(crate) async fn remove(State(state): Shared, Path(id): Path<String>) -> Reply<Deleted> {
    reply(state.backend.delete_narrative(&id).await)
}
