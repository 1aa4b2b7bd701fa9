use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::SessionConfig;

/// Key holding the serialized signed-in [`User`](crate::types::User).
pub const USER_KEY: &str = "dexterUser";
/// Key holding the bearer token issued at login.
pub const TOKEN_KEY: &str = "token";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid session key `{0}`")]
    InvalidKey(String),
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// File-system-backed key-value store for session data.
///
/// Each key is one file under a configurable directory (defaults to
/// `~/.config/dexter/session/`). Values are opaque strings; the `*_json`
/// helpers layer serde on top.
#[derive(Debug, Clone)]
pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    /// Create a store with the default directory (`~/.config/dexter/session/`).
    pub fn default_path() -> Self {
        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("dexter")
            .join("session");
        Self { base_dir: base }
    }

    /// Create a store backed by a custom directory (useful for testing).
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn from_config(cfg: &SessionConfig) -> Self {
        match &cfg.dir {
            Some(dir) => Self::new(PathBuf::from(dir)),
            None => Self::default_path(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.base_dir
    }

    fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }

    /// Keys map straight to file names, so only `[A-Za-z0-9_-]` is allowed.
    fn key_path(&self, key: &str) -> Result<PathBuf, SessionStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SessionStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }

    /// Read a raw value. Returns `None` if the key is unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;
        std::fs::write(path, value)?;
        Ok(())
    }

    /// Remove a key. Returns `true` if it was present.
    pub fn remove(&self, key: &str) -> Result<bool, SessionStoreError> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Read and deserialize a value. A present but malformed value is an
    /// error; the caller decides whether to discard it.
    /// Decode a stored JSON value. Bytes that are not valid JSON, including
    /// invalid UTF-8, are reported as [`SessionStoreError::Serde`].
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionStoreError> {
        let path = self.key_path(key)?;
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string_pretty(value)?;
        self.set(key, &json)
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>, SessionStoreError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn temp_store() -> (SessionStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SessionStore::new(dir.path().join("session"));
        (store, dir)
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        compact: bool,
    }

    #[test]
    fn raw_set_get_remove() {
        let (store, _dir) = temp_store();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, "mock-jwt-token").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("mock-jwt-token"));

        assert!(store.remove(TOKEN_KEY).unwrap());
        assert!(!store.remove(TOKEN_KEY).unwrap());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_a_serde_error() {
        let (store, _dir) = temp_store();
        store.set(USER_KEY, "{}").unwrap();
        std::fs::write(store.dir().join("dexterUser.json"), [0xff, 0xfe]).unwrap();
        assert!(matches!(
            store.get_json::<Prefs>(USER_KEY),
            Err(SessionStoreError::Serde(_))
        ));
    }

    #[test]
    fn json_roundtrip() {
        let (store, _dir) = temp_store();
        let prefs = Prefs {
            theme: "dark".into(),
            compact: true,
        };
        store.set_json("prefs", &prefs).unwrap();
        let loaded: Prefs = store.get_json("prefs").unwrap().unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let (store, _dir) = temp_store();
        store.set(USER_KEY, "{not json").unwrap();
        let err = store.get_json::<Prefs>(USER_KEY).unwrap_err();
        assert!(matches!(err, SessionStoreError::Serde(_)));
    }

    #[test]
    fn rejects_path_like_keys() {
        let (store, _dir) = temp_store();
        for key in ["", "../etc", "a/b", "x.y"] {
            assert!(matches!(
                store.set(key, "v"),
                Err(SessionStoreError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn lists_keys() {
        let (store, _dir) = temp_store();
        assert!(store.keys().unwrap().is_empty());
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["dexterUser", "token"]);
    }
}
