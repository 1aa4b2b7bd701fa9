use async_trait::async_trait;
use dx_api_types::{ApiError, ApiResult, Envelope, Page};
use dx_core::config::{ApiConfig, BackendMode};
use dx_core::query::{
    ActorFilter, AlertFilter, NarrativeFilter, Pagination, ReportFilter, TimelineFilter,
};
use dx_core::session_store::{SessionStore, TOKEN_KEY};
use dx_core::types::*;
use dx_telemetry::metrics::{global_metrics, MetricsCollector};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::DataBackend;
use crate::endpoint::Endpoint;

/// Backend that forwards every operation to the REST API at
/// `api.base_url`, attaching the stored bearer token when there is one.
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
    store: Arc<SessionStore>,
    metrics: &'static MetricsCollector,
}

impl HttpBackend {
    pub fn new(cfg: &ApiConfig, store: Arc<SessionStore>) -> Result<Self, HttpSetupError> {
        let base = Url::parse(&cfg.base_url)
            .map_err(|e| HttpSetupError::BaseUrl(format!("{}: {e}", cfg.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(HttpSetupError::BaseUrl(cfg.base_url.clone()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base,
            store,
            metrics: global_metrics(),
        })
    }

    pub fn with_metrics(mut self, metrics: &'static MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("invalid base url {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let req = self.client.request(method, self.url(segments)?);
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) => Ok(req.bearer_auth(token.trim())),
            Ok(None) => Ok(req),
            Err(e) => {
                tracing::warn!("could not read session token: {e}");
                Ok(req)
            }
        }
    }

    /// Send and return the raw body of a 2xx response. Non-2xx responses are
    /// turned into the matching [`ApiError`].
    async fn exchange(&self, endpoint: Endpoint, req: RequestBuilder) -> ApiResult<Vec<u8>> {
        let start = Instant::now();
        let outcome = roundtrip(req).await;
        self.metrics
            .record_backend_call(endpoint.name(), start.elapsed(), outcome.is_err());
        if let Err(e) = &outcome {
            tracing::debug!(endpoint = endpoint.name(), code = e.code(), "http call failed: {e}");
        }
        outcome
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        req: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.exchange(endpoint, req).await?;
        decode::<T>(&body)?.into_result()
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        req: RequestBuilder,
    ) -> ApiResult<Page<T>> {
        let body = self.exchange(endpoint, req).await?;
        decode::<Vec<T>>(&body)?.into_page()
    }

    async fn fetch_unit(&self, endpoint: Endpoint, req: RequestBuilder) -> ApiResult<()> {
        let body = self.exchange(endpoint, req).await?;
        if body.is_empty() {
            return Ok(());
        }
        decode::<serde_json::Value>(&body)?.into_unit()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpSetupError {
    #[error("invalid api base url: {0}")]
    BaseUrl(String),
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

async fn roundtrip(req: RequestBuilder) -> ApiResult<Vec<u8>> {
    let resp = req.send().await.map_err(transport_error)?;
    let status = resp.status();
    let body = resp.bytes().await.map_err(transport_error)?;
    if !status.is_success() {
        return Err(error_from_body(status.as_u16(), &body));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<Envelope<T>> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Prefer a failure envelope from the body; fall back to a plain message.
pub(crate) fn error_from_body(status: u16, body: &[u8]) -> ApiError {
    if let Ok(env) = serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        if !env.success {
            let message = env
                .error
                .unwrap_or_else(|| format!("HTTP error {status}"));
            return match env.code {
                Some(code) => {
                    ApiError::from_code(Some(&code), message, env.status.or(Some(status)))
                }
                None => ApiError::Http { status, message },
            };
        }
    }
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP error {status}"));
    ApiError::Http { status, message }
}

// ---------------------------------------------------------------------------
// DataBackend
// ---------------------------------------------------------------------------

#[async_trait]
impl DataBackend for HttpBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Http
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginGrant> {
        let req = self.request(Method::POST, &["auth", "login"])?.json(credentials);
        self.fetch(Endpoint::Login, req).await
    }

    async fn logout(&self) -> ApiResult<()> {
        let req = self.request(Method::POST, &["auth", "logout"])?;
        self.fetch_unit(Endpoint::Logout, req).await
    }

    async fn profile(&self) -> ApiResult<User> {
        let req = self.request(Method::GET, &["auth", "profile"])?;
        self.fetch(Endpoint::Profile, req).await
    }

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        let req = self.request(Method::GET, &["dashboard", "summary"])?;
        self.fetch(Endpoint::DashboardSummary, req).await
    }

    async fn dashboard_stats(&self) -> ApiResult<Vec<DashboardStat>> {
        let req = self.request(Method::GET, &["dashboard", "stats"])?;
        self.fetch(Endpoint::DashboardStats, req).await
    }

    async fn dashboard_activity(&self, limit: Option<usize>) -> ApiResult<Vec<ActivityItem>> {
        let mut req = self.request(Method::GET, &["dashboard", "activity"])?;
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit)]);
        }
        self.fetch(Endpoint::DashboardActivity, req).await
    }

    async fn dashboard_trends(&self) -> ApiResult<TrendData> {
        let req = self.request(Method::GET, &["dashboard", "trends"])?;
        self.fetch(Endpoint::DashboardTrends, req).await
    }

    async fn list_narratives(
        &self,
        criteria: &NarrativeFilter,
        page: Pagination,
    ) -> ApiResult<Page<Narrative>> {
        let req = self
            .request(Method::GET, &["narratives"])?
            .query(criteria)
            .query(&page);
        self.fetch_page(Endpoint::ListNarratives, req).await
    }

    async fn narrative(&self, id: &str) -> ApiResult<Narrative> {
        let req = self.request(Method::GET, &["narratives", id])?;
        self.fetch(Endpoint::Narrative, req).await
    }

    async fn related_narratives(&self, id: &str) -> ApiResult<Vec<Narrative>> {
        let req = self.request(Method::GET, &["narratives", id, "related"])?;
        self.fetch(Endpoint::RelatedNarratives, req).await
    }

    async fn narrative_timeline(&self, id: &str) -> ApiResult<Vec<TimelineEvent>> {
        let req = self.request(Method::GET, &["narratives", id, "timeline"])?;
        self.fetch(Endpoint::NarrativeTimeline, req).await
    }

    async fn create_narrative(&self, draft: &NarrativeDraft) -> ApiResult<Narrative> {
        let req = self.request(Method::POST, &["narratives"])?.json(draft);
        self.fetch(Endpoint::CreateNarrative, req).await
    }

    async fn update_narrative(&self, id: &str, patch: &NarrativePatch) -> ApiResult<Narrative> {
        let req = self.request(Method::PUT, &["narratives", id])?.json(patch);
        self.fetch(Endpoint::UpdateNarrative, req).await
    }

    async fn delete_narrative(&self, id: &str) -> ApiResult<Deleted> {
        let req = self.request(Method::DELETE, &["narratives", id])?;
        self.fetch(Endpoint::DeleteNarrative, req).await
    }

    async fn list_actors(&self, criteria: &ActorFilter, page: Pagination) -> ApiResult<Page<Actor>> {
        let req = self
            .request(Method::GET, &["actors"])?
            .query(criteria)
            .query(&page);
        self.fetch_page(Endpoint::ListActors, req).await
    }

    async fn actor(&self, id: &str) -> ApiResult<Actor> {
        let req = self.request(Method::GET, &["actors", id])?;
        self.fetch(Endpoint::Actor, req).await
    }

    async fn actor_network(&self, id: &str) -> ApiResult<ActorNetwork> {
        let req = self.request(Method::GET, &["actors", id, "network"])?;
        self.fetch(Endpoint::ActorNetwork, req).await
    }

    async fn actor_activity(&self, id: &str) -> ApiResult<ActorActivity> {
        let req = self.request(Method::GET, &["actors", id, "activity"])?;
        self.fetch(Endpoint::ActorActivity, req).await
    }

    async fn list_alerts(&self, criteria: &AlertFilter, page: Pagination) -> ApiResult<Page<Alert>> {
        let req = self
            .request(Method::GET, &["alerts"])?
            .query(criteria)
            .query(&page);
        self.fetch_page(Endpoint::ListAlerts, req).await
    }

    async fn alert(&self, id: &str) -> ApiResult<Alert> {
        let req = self.request(Method::GET, &["alerts", id])?;
        self.fetch(Endpoint::Alert, req).await
    }

    async fn acknowledge_alert(&self, id: &str) -> ApiResult<AlertAcknowledgement> {
        let req = self.request(Method::POST, &["alerts", id, "acknowledge"])?;
        self.fetch(Endpoint::AcknowledgeAlert, req).await
    }

    async fn escalate_alert(&self, id: &str) -> ApiResult<AlertEscalation> {
        let req = self.request(Method::POST, &["alerts", id, "escalate"])?;
        self.fetch(Endpoint::EscalateAlert, req).await
    }

    async fn timeline(&self, criteria: &TimelineFilter) -> ApiResult<TimelineView> {
        let req = self.request(Method::GET, &["timeline"])?.query(criteria);
        self.fetch(Endpoint::Timeline, req).await
    }

    async fn list_reports(&self, criteria: &ReportFilter, page: Pagination) -> ApiResult<Page<Report>> {
        let req = self
            .request(Method::GET, &["reports"])?
            .query(criteria)
            .query(&page);
        self.fetch_page(Endpoint::ListReports, req).await
    }

    async fn report(&self, id: &str) -> ApiResult<Report> {
        let req = self.request(Method::GET, &["reports", id])?;
        self.fetch(Endpoint::Report, req).await
    }

    async fn create_report(&self, request: &ReportRequest) -> ApiResult<Report> {
        let req = self.request(Method::POST, &["reports"])?.json(request);
        self.fetch(Endpoint::CreateReport, req).await
    }

    async fn export_report(&self, id: &str, format: ExportFormat) -> ApiResult<ExportTicket> {
        let req = self
            .request(Method::GET, &["reports", id, "export"])?
            .query(&[("format", format.as_str())]);
        self.fetch(Endpoint::ExportReport, req).await
    }

    async fn lexicons(&self) -> ApiResult<Vec<Lexicon>> {
        let req = self.request(Method::GET, &["lexicon"])?;
        self.fetch(Endpoint::Lexicons, req).await
    }

    async fn lexicon_terms(&self, language: &str) -> ApiResult<LexiconEntries> {
        let req = self.request(Method::GET, &["lexicon", language])?;
        self.fetch(Endpoint::LexiconTerms, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> (HttpBackend, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().to_path_buf()));
        let cfg = ApiConfig {
            base_url: base.into(),
            ..ApiConfig::default()
        };
        (HttpBackend::new(&cfg, store).unwrap(), dir)
    }

    #[test]
    fn urls_escape_segments() {
        let (b, _dir) = backend("http://localhost:3000/api/v1/");
        let url = b.url(&["narratives", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/narratives/a%2Fb%20c");
    }

    #[test]
    fn urls_without_trailing_slash() {
        let (b, _dir) = backend("http://localhost:3000/api/v1");
        let url = b.url(&["alerts", "1", "acknowledge"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/alerts/1/acknowledge");
    }

    #[test]
    fn rejects_bad_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().to_path_buf()));
        let cfg = ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HttpBackend::new(&cfg, store),
            Err(HttpSetupError::BaseUrl(_))
        ));
    }

    #[test]
    fn error_body_with_envelope_keeps_code() {
        let body = br#"{"success":false,"error":"Alert not found","code":"NOT_FOUND"}"#;
        assert_eq!(error_from_body(404, body), ApiError::not_found("Alert"));
    }

    #[test]
    fn error_body_plain_message() {
        let body = br#"{"message":"upstream exploded"}"#;
        assert_eq!(
            error_from_body(500, body),
            ApiError::Http {
                status: 500,
                message: "upstream exploded".into()
            }
        );
        assert_eq!(
            error_from_body(502, b"<html>bad gateway</html>"),
            ApiError::Http {
                status: 502,
                message: "HTTP error 502".into()
            }
        );
    }

    #[test]
    fn bridged_http_failure_keeps_upstream_status() {
        let body = br#"{"success":false,"error":"rate limited","code":"HTTP","status":429}"#;
        assert_eq!(
            error_from_body(502, body),
            ApiError::Http {
                status: 429,
                message: "rate limited".into()
            }
        );
    }

    #[test]
    fn decodes_entity_envelopes() {
        let dataset = dx_core::dataset::Dataset::seed().unwrap();
        let narrative = dataset.narratives.get("1").unwrap().clone();
        let body = serde_json::to_vec(&Envelope::ok(narrative.clone())).unwrap();
        let env = decode::<Narrative>(&body).unwrap();
        assert_eq!(env.into_result().unwrap(), narrative);
    }
}
