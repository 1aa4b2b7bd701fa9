//! Backend selection.
//!
//! The active [`DataBackend`] is decided once, from configuration, and
//! handed to callers as a trait object. Nothing downstream branches on the
//! mode.

use dx_core::config::{BackendMode, Config};
use dx_core::dataset::{seed_dataset, DatasetError};
use dx_core::session_store::SessionStore;
use std::sync::Arc;

use crate::backend::DataBackend;
use crate::http::{HttpBackend, HttpSetupError};
use crate::mock::MockBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("seed dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Http(#[from] HttpSetupError),
}

/// Build the backend named by `cfg.api.mode`.
pub fn backend_from_config(
    cfg: &Config,
    store: Arc<SessionStore>,
) -> Result<Arc<dyn DataBackend>, BackendError> {
    let backend: Arc<dyn DataBackend> = match cfg.api.mode {
        BackendMode::Mock => {
            let dataset = seed_dataset()?;
            Arc::new(MockBackend::from_config(dataset, &cfg.mock))
        }
        BackendMode::Http => Arc::new(HttpBackend::new(&cfg.api, store)?),
    };
    tracing::info!(
        mode = %cfg.api.mode,
        base_url = %cfg.api.base_url,
        latency_scale = cfg.mock.latency_scale,
        "data backend ready"
    );
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Arc<SessionStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (Arc::new(SessionStore::new(dir.path().to_path_buf())), dir)
    }

    #[test]
    fn default_config_selects_mock() {
        let (store, _dir) = store();
        let backend = backend_from_config(&Config::default(), store).unwrap();
        assert_eq!(backend.mode(), BackendMode::Mock);
    }

    #[test]
    fn http_mode_selects_http() {
        let (store, _dir) = store();
        let mut cfg = Config::default();
        cfg.api.mode = BackendMode::Http;
        let backend = backend_from_config(&cfg, store).unwrap();
        assert_eq!(backend.mode(), BackendMode::Http);
    }
}
