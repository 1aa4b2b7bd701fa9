use async_trait::async_trait;
use dx_api_types::{ApiResult, Page};
use dx_core::config::BackendMode;
use dx_core::query::{
    ActorFilter, AlertFilter, NarrativeFilter, Pagination, ReportFilter, TimelineFilter,
};
use dx_core::types::*;

/// The data source the application talks to.
///
/// Implemented by [`MockBackend`](crate::mock::MockBackend), which serves
/// the seed dataset with simulated latency and faults, and by
/// [`HttpBackend`](crate::http::HttpBackend), which calls the REST API.
/// Callers hold an `Arc<dyn DataBackend>` and never know which one is active.
///
/// Every failure, including not-found lookups and timeouts, comes back as
/// an `Err(ApiError)`; no method panics.
#[async_trait]
pub trait DataBackend: Send + Sync {
    fn mode(&self) -> BackendMode;

    // -- Auth ---------------------------------------------------------------

    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginGrant>;

    async fn logout(&self) -> ApiResult<()>;

    async fn profile(&self) -> ApiResult<User>;

    // -- Dashboard ----------------------------------------------------------

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary>;

    async fn dashboard_stats(&self) -> ApiResult<Vec<DashboardStat>>;

    /// Most recent activity first. `None` or `Some(0)` returns everything.
    async fn dashboard_activity(&self, limit: Option<usize>) -> ApiResult<Vec<ActivityItem>>;

    async fn dashboard_trends(&self) -> ApiResult<TrendData>;

    // -- Narratives ---------------------------------------------------------

    async fn list_narratives(
        &self,
        filter: &NarrativeFilter,
        page: Pagination,
    ) -> ApiResult<Page<Narrative>>;

    async fn narrative(&self, id: &str) -> ApiResult<Narrative>;

    /// Up to three other narratives sharing the category or a platform.
    async fn related_narratives(&self, id: &str) -> ApiResult<Vec<Narrative>>;

    /// Events for one narrative, oldest first.
    async fn narrative_timeline(&self, id: &str) -> ApiResult<Vec<TimelineEvent>>;

    async fn create_narrative(&self, draft: &NarrativeDraft) -> ApiResult<Narrative>;

    async fn update_narrative(&self, id: &str, patch: &NarrativePatch) -> ApiResult<Narrative>;

    async fn delete_narrative(&self, id: &str) -> ApiResult<Deleted>;

    // -- Actors -------------------------------------------------------------

    async fn list_actors(&self, filter: &ActorFilter, page: Pagination)
        -> ApiResult<Page<Actor>>;

    async fn actor(&self, id: &str) -> ApiResult<Actor>;

    async fn actor_network(&self, id: &str) -> ApiResult<ActorNetwork>;

    async fn actor_activity(&self, id: &str) -> ApiResult<ActorActivity>;

    // -- Alerts -------------------------------------------------------------

    async fn list_alerts(&self, filter: &AlertFilter, page: Pagination)
        -> ApiResult<Page<Alert>>;

    async fn alert(&self, id: &str) -> ApiResult<Alert>;

    async fn acknowledge_alert(&self, id: &str) -> ApiResult<AlertAcknowledgement>;

    async fn escalate_alert(&self, id: &str) -> ApiResult<AlertEscalation>;

    // -- Timeline -----------------------------------------------------------

    async fn timeline(&self, filter: &TimelineFilter) -> ApiResult<TimelineView>;

    // -- Reports ------------------------------------------------------------

    async fn list_reports(&self, filter: &ReportFilter, page: Pagination)
        -> ApiResult<Page<Report>>;

    async fn report(&self, id: &str) -> ApiResult<Report>;

    async fn create_report(&self, request: &ReportRequest) -> ApiResult<Report>;

    async fn export_report(&self, id: &str, format: ExportFormat) -> ApiResult<ExportTicket>;

    // -- Lexicon ------------------------------------------------------------

    async fn lexicons(&self) -> ApiResult<Vec<Lexicon>>;

    async fn lexicon_terms(&self, language: &str) -> ApiResult<LexiconEntries>;
}
