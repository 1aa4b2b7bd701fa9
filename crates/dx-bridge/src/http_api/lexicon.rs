use axum::extract::{Path, State};
use dx_core::types::{Lexicon, LexiconEntries};

use super::{reply, Reply, Shared};

pub(crate) async fn list(State(state): Shared) -> Reply<Vec<Lexicon>> {
    reply(state.backend.lexicons().await)
}

pub(crate) async fn terms(State(state): Shared, Path(language): Path<String>) -> Reply<LexiconEntries> {
    reply(state.backend.lexicon_terms(&language).await)
}
