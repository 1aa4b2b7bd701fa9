use dx_api_types::ApiError;
use dx_core::session_store::{SessionStore, SessionStoreError, TOKEN_KEY, USER_KEY};
use dx_core::types::{Credentials, User};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::DataBackend;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session store: {0}")]
    Store(#[from] SessionStoreError),
}

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// The signed-in user, owned explicitly instead of looked up ambiently.
///
/// Lifecycle: [`init`](Self::init) reads the persisted user once, then
/// [`login`](Self::login) and [`logout`](Self::logout) keep memory and the
/// store in step. A persisted user is the only authentication signal.
pub struct SessionContext {
    backend: Arc<dyn DataBackend>,
    store: Arc<SessionStore>,
    user: RwLock<Option<User>>,
}

impl SessionContext {
    /// Restore any persisted session. Malformed data counts as signed out and
    /// is removed from the store.
    pub async fn init(
        backend: Arc<dyn DataBackend>,
        store: Arc<SessionStore>,
    ) -> Result<Self, SessionError> {
        let user = match store.get_json::<User>(USER_KEY) {
            Ok(user) => user,
            Err(SessionStoreError::Serde(e)) => {
                tracing::warn!("discarding malformed session data: {e}");
                store.remove(USER_KEY)?;
                store.remove(TOKEN_KEY)?;
                None
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(u) = &user {
            tracing::debug!(user = %u.email, "restored session");
        }
        Ok(Self {
            backend,
            store,
            user: RwLock::new(user),
        })
    }

    pub fn backend(&self) -> &Arc<dyn DataBackend> {
        &self.backend
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        let grant = self.backend.login(credentials).await?;
        self.store.set(TOKEN_KEY, &grant.token)?;
        self.store.set_json(USER_KEY, &grant.user)?;
        tracing::info!(user = %grant.user.email, "signed in");
        *self.user.write().await = Some(grant.user.clone());
        Ok(grant.user)
    }

    /// Sign out locally even when the backend call fails.
    pub async fn logout(&self) -> Result<(), SessionError> {
        if let Err(e) = self.backend.logout().await {
            tracing::warn!("backend logout failed, clearing local session anyway: {e}");
        }
        self.user.write().await.take();
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        tracing::info!("signed out");
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(TOKEN_KEY)?)
    }
}
