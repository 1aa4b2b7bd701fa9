use std::sync::Arc;

use dx_backend::{DataBackend, MockBackend, SessionContext, SessionError, MOCK_TOKEN};
use dx_core::dataset::Dataset;
use dx_core::session_store::{SessionStore, TOKEN_KEY, USER_KEY};
use dx_core::types::{Credentials, User};
use dx_harness::fault::AlwaysFail;
use dx_harness::latency::DelaySimulator;
use dx_harness::Simulator;

fn backend() -> Arc<dyn DataBackend> {
    Arc::new(MockBackend::instant(Arc::new(Dataset::seed().unwrap())))
}

fn temp_store() -> (Arc<SessionStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = Arc::new(SessionStore::new(dir.path().join("session")));
    (store, dir)
}

#[tokio::test]
async fn fresh_store_is_signed_out() {
    let (store, _dir) = temp_store();
    let session = SessionContext::init(backend(), store).await.unwrap();
    assert!(!session.is_authenticated().await);
    assert!(session.current_user().await.is_none());
}

#[tokio::test]
async fn login_persists_and_survives_reinit() {
    let (store, _dir) = temp_store();
    let session = SessionContext::init(backend(), store.clone()).await.unwrap();
    let user = session
        .login(&Credentials::new("demo@example.com", "secret"))
        .await
        .unwrap();
    assert!(session.is_authenticated().await);
    assert_eq!(session.token().unwrap().as_deref(), Some(MOCK_TOKEN));

    let restored = SessionContext::init(backend(), store).await.unwrap();
    assert_eq!(restored.current_user().await, Some(user));
}

#[tokio::test]
async fn failed_login_stores_nothing() {
    let (store, _dir) = temp_store();
    let session = SessionContext::init(backend(), store.clone()).await.unwrap();
    let err = session
        .login(&Credentials::new("demo@example.com", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Api(_)));
    assert!(store.keys().unwrap().is_empty());
}

#[tokio::test]
async fn logout_clears_even_when_backend_fails() {
    let (store, _dir) = temp_store();
    let session = SessionContext::init(backend(), store.clone()).await.unwrap();
    session
        .login(&Credentials::new("demo@example.com", "secret"))
        .await
        .unwrap();

    let failing: Arc<dyn DataBackend> = Arc::new(MockBackend::new(
        Arc::new(Dataset::seed().unwrap()),
        Simulator::new(DelaySimulator::instant(), Arc::new(AlwaysFail)),
    ));
    let session = SessionContext::init(failing, store.clone()).await.unwrap();
    assert!(session.is_authenticated().await);

    session.logout().await.unwrap();
    assert!(!session.is_authenticated().await);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn malformed_session_is_discarded() {
    let (store, _dir) = temp_store();
    store.set(USER_KEY, "{\"id\": 12").unwrap();
    store.set(TOKEN_KEY, "stale").unwrap();

    let session = SessionContext::init(backend(), store.clone()).await.unwrap();
    assert!(!session.is_authenticated().await);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn non_utf8_session_is_discarded() {
    let (store, _dir) = temp_store();
    store.set(TOKEN_KEY, "stale").unwrap();
    std::fs::write(store.dir().join(format!("{USER_KEY}.json")), [0xff, 0xfe, 0x00]).unwrap();

    let session = SessionContext::init(backend(), store.clone()).await.unwrap();
    assert!(!session.is_authenticated().await);
    assert!(store.keys().unwrap().is_empty());
}

#[tokio::test]
async fn stored_user_round_trips_wire_format() {
    let (store, _dir) = temp_store();
    let session = SessionContext::init(backend(), store.clone()).await.unwrap();
    session
        .login(&Credentials::new("demo@example.com", "secret"))
        .await
        .unwrap();
    let raw = store.get(USER_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["isActive"], true);
    let user: User = serde_json::from_value(value).unwrap();
    assert_eq!(user.email, "demo@example.com");
}
