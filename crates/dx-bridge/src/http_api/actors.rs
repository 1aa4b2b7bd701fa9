use axum::extract::{Path, Query, State};
use dx_core::query::{ActorFilter, Pagination};
use dx_core::types::{Actor, ActorActivity, ActorNetwork};

use super::{reply, reply_page, Reply, Shared};

pub(crate) async fn list(
    State(state): Shared,
    Query(criteria): Query<ActorFilter>,
    Query(page): Query<Pagination>,
) -> Reply<Vec<Actor>> {
    reply_page(state.backend.list_actors(&criteria, page).await)
}

pub(crate) async fn get_one(State(state): Shared, Path(id): Path<String>) -> Reply<Actor> {
    reply(state.backend.actor(&id).await)
}

pub(crate) async fn network(State(state): Shared, Path(id): Path<String>) -> Reply<ActorNetwork> {
    reply(state.backend.actor_network(&id).await)
}

pub(crate) async fn activity(State(state): Shared, Path(id): Path<String>) -> Reply<ActorActivity> {
    reply(state.backend.actor_activity(&id).await)
}
