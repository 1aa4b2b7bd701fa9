pub mod actors;
pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod lexicon;
pub mod narratives;
pub mod reports;
pub mod serve;
pub mod timeline;

use std::sync::Arc;

use dx_backend::{backend_from_config, DataBackend, SessionContext};
use dx_core::config::Config;
use dx_core::query::Pagination;
use dx_core::session_store::SessionStore;
use serde::Serialize;

use crate::PageArgs;

/// Everything a subcommand needs, built once at startup.
pub struct Context {
    pub config: Config,
    pub backend: Arc<dyn DataBackend>,
    pub session: SessionContext,
    pub json: bool,
}

impl Context {
    pub async fn build(config: Config, json: bool) -> anyhow::Result<Self> {
        let store = Arc::new(SessionStore::from_config(&config.session));
        let backend = backend_from_config(&config, store.clone())?;
        let session = SessionContext::init(backend.clone(), store).await?;
        Ok(Self {
            config,
            backend,
            session,
            json,
        })
    }

    #[cfg(test)]
    pub async fn for_tests(dir: &std::path::Path) -> Self {
        let mut config = Config::default();
        config.mock.latency_scale = 0.0;
        config.mock.faults_enabled = false;
        config.session.dir = Some(dir.to_string_lossy().into_owned());
        Self::build(config, false).await.unwrap()
    }

    /// Print `value` as JSON when `--json` was given, else run `human`.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination {
            page: args.page,
            per_page: args.per_page,
        }
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

pub fn rule() -> String {
    "-".repeat(60)
}

pub fn page_footer(meta: &dx_api_types::PageMeta, shown: usize) {
    if shown < meta.total {
        println!("({shown} of {} shown, page {})", meta.total, meta.page);
    }
}
