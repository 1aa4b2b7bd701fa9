use async_trait::async_trait;
use chrono::Utc;
use dx_api_types::{ApiError, ApiResult, Page};
use dx_core::config::{BackendMode, MockConfig};
use dx_core::dataset::Dataset;
use dx_core::query::{
    filter, paginate, timeline_events, ActorFilter, AlertFilter, NarrativeFilter, Pagination,
    ReportFilter, TimelineFilter,
};
use dx_core::types::*;
use dx_harness::fault::{FaultPolicy, FixedProbability, NeverFail, RandomFaults};
use dx_harness::latency::DelaySimulator;
use dx_harness::profile::EndpointProfile;
use dx_harness::Simulator;
use dx_telemetry::metrics::{global_metrics, MetricsCollector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::backend::DataBackend;
use crate::endpoint::Endpoint;

/// Token handed out by a successful mock login.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

const RELATED_LIMIT: usize = 3;
const GENERATED_BY: &str = "Current User";
const EXPORT_BASE_URL: &str = "https://example.com/reports";

// ---------------------------------------------------------------------------
// Identifier generation
// ---------------------------------------------------------------------------

/// Millisecond-timestamp identifiers that never repeat within a process,
/// even when two records are created in the same millisecond.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    pub fn next(&self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return format!("{prefix}-{candidate}"),
                Err(actual) => prev = actual,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MockBackend
// ---------------------------------------------------------------------------

/// In-process backend over the read-only seed dataset.
///
/// Each call waits out its endpoint latency, rolls the fault policy, and
/// only then touches the data. Write-like operations return new values and
/// leave the dataset untouched.
pub struct MockBackend {
    dataset: Arc<Dataset>,
    sim: Simulator,
    overrides: HashMap<Endpoint, EndpointProfile>,
    ids: IdSequence,
    metrics: &'static MetricsCollector,
}

impl MockBackend {
    pub fn new(dataset: Arc<Dataset>, sim: Simulator) -> Self {
        Self {
            dataset,
            sim,
            overrides: HashMap::new(),
            ids: IdSequence::default(),
            metrics: global_metrics(),
        }
    }

    /// No latency, no faults. Used by tests and offline tooling.
    pub fn instant(dataset: Arc<Dataset>) -> Self {
        Self::new(dataset, Simulator::instant())
    }

    /// Build the simulator described by the `[mock]` config section.
    pub fn from_config(dataset: Arc<Dataset>, cfg: &MockConfig) -> Self {
        let base: Arc<dyn FaultPolicy> = if !cfg.faults_enabled {
            Arc::new(NeverFail)
        } else {
            match cfg.fault_seed {
                Some(seed) => Arc::new(RandomFaults::seeded(seed)),
                None => Arc::new(RandomFaults::new()),
            }
        };
        let faults: Arc<dyn FaultPolicy> = match cfg.fault_probability {
            Some(p) if cfg.faults_enabled => Arc::new(FixedProbability::new(base, p)),
            _ => base,
        };
        let sim = Simulator::new(DelaySimulator::new(cfg.latency_scale), faults);
        Self::new(dataset, sim)
    }

    /// Replace one endpoint's latency and fault probability.
    pub fn with_profile(mut self, endpoint: Endpoint, profile: EndpointProfile) -> Self {
        self.overrides.insert(endpoint, profile);
        self
    }

    pub fn with_metrics(mut self, metrics: &'static MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn profile(&self, endpoint: Endpoint) -> EndpointProfile {
        self.overrides
            .get(&endpoint)
            .copied()
            .unwrap_or_else(|| endpoint.profile())
    }

    /// Delay, fault check, then `op` against the dataset.
    async fn call<T: Send>(
        &self,
        endpoint: Endpoint,
        op: impl FnOnce(&Dataset) -> ApiResult<T> + Send,
    ) -> ApiResult<T> {
        let start = Instant::now();
        let name = endpoint.name();
        let outcome = self.sim.run(name, &self.profile(endpoint)).await;
        let injected = outcome.is_err();
        let result = match outcome {
            Err(_) => Err(ApiError::Transient(endpoint.fault_message().to_string())),
            Ok(()) => op(&self.dataset),
        };
        self.metrics
            .record_backend_call(name, start.elapsed(), injected);
        match &result {
            Ok(_) => tracing::debug!(endpoint = name, "mock call ok"),
            Err(e) => tracing::debug!(endpoint = name, code = e.code(), "mock call failed: {e}"),
        }
        result
    }
}

fn lookup<'a, T: Identified>(
    items: &'a dx_core::dataset::Collection<T>,
    id: &str,
    entity: &str,
) -> ApiResult<&'a T> {
    items.get(id).ok_or_else(|| ApiError::not_found(entity))
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Jaccard overlap of two actors' narrative sets, rounded to hundredths.
fn edge_strength(a: &Actor, b: &Actor, shared: usize) -> Score {
    let union = a.narratives.len() + b.narratives.len() - shared;
    if union == 0 {
        return Score::saturating(0.0);
    }
    let raw = shared as f64 / union as f64;
    Score::saturating((raw * 100.0).round() / 100.0)
}

fn network_for(ds: &Dataset, actor: &Actor) -> ActorNetwork {
    let mut nodes = vec![NetworkNode {
        id: actor.id.clone(),
        label: actor.name.clone(),
        role: NodeRole::Primary,
    }];
    let mut edges = Vec::new();
    for other in ds.actors.iter().filter(|a| a.id != actor.id) {
        let shared = actor.shared_narratives(other);
        if shared.is_empty() {
            continue;
        }
        nodes.push(NetworkNode {
            id: other.id.clone(),
            label: other.name.clone(),
            role: NodeRole::Related,
        });
        edges.push(NetworkEdge {
            from: actor.id.clone(),
            to: other.id.clone(),
            strength: edge_strength(actor, other, shared.len()),
            narratives: shared,
        });
    }
    ActorNetwork { nodes, edges }
}

/// Each of the actor's narratives as a share of their combined volume.
fn activity_for(ds: &Dataset, actor: &Actor) -> ActorActivity {
    let known: Vec<(&String, Option<&Narrative>)> = actor
        .narratives
        .iter()
        .map(|id| (id, ds.narratives.get(id)))
        .collect();
    let total: u64 = known.iter().filter_map(|(_, n)| n.map(|n| n.volume)).sum();

    let narrative_distribution = known
        .into_iter()
        .map(|(id, n)| {
            let volume = n.map(|n| n.volume).unwrap_or(0);
            let percentage = if total == 0 {
                0
            } else {
                ((volume as f64 * 100.0) / total as f64).round() as u8
            };
            NarrativeShare {
                id: id.clone(),
                title: n
                    .map(|n| n.title.clone())
                    .unwrap_or_else(|| "Unknown Narrative".into()),
                percentage,
            }
        })
        .collect();

    ActorActivity {
        volume_by_day: ds.activity.volume_by_day.clone(),
        narrative_distribution,
        recent_posts: ds.activity.recent_posts.clone(),
    }
}

fn related_to(ds: &Dataset, target: &Narrative) -> Vec<Narrative> {
    ds.narratives
        .iter()
        .filter(|n| n.id != target.id)
        .filter(|n| {
            n.category == target.category
                || n.platforms.iter().any(|p| target.platforms.contains(p))
        })
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}

fn generated_report(id: String, request: &ReportRequest) -> Report {
    let visualizations = if request.include_charts {
        vec![
            Visualization {
                title: "Primary Visualization".into(),
                description: "Main visualization based on report type and parameters".into(),
            },
            Visualization {
                title: "Secondary Visualization".into(),
                description: "Supporting visualization based on report type and parameters"
                    .into(),
            },
        ]
    } else {
        Vec::new()
    };
    let recommendations = if request.include_recommendations {
        (1..=3)
            .map(|i| format!("Recommendation {i} based on findings"))
            .collect()
    } else {
        Vec::new()
    };

    Report {
        id,
        title: request.title.clone(),
        report_type: request.report_type.label().to_string(),
        created_at: Utc::now(),
        created_by: GENERATED_BY.into(),
        summary: "This newly generated report provides analysis based on your selected criteria."
            .into(),
        key_findings: (1..=3)
            .map(|i| format!("Finding {i} based on selected parameters"))
            .collect(),
        visualizations,
        recommendations,
    }
}

// ---------------------------------------------------------------------------
// DataBackend
// ---------------------------------------------------------------------------

#[async_trait]
impl DataBackend for MockBackend {
    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginGrant> {
        self.call(Endpoint::Login, |ds| {
            if credentials.email.is_empty() || credentials.password.is_empty() {
                return Err(ApiError::InvalidCredentials);
            }
            let user = ds
                .user_by_email(&credentials.email)
                .ok_or(ApiError::InvalidCredentials)?;
            Ok(LoginGrant {
                user: user.clone(),
                token: MOCK_TOKEN.into(),
            })
        })
        .await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.call(Endpoint::Logout, |_| Ok(())).await
    }

    async fn profile(&self) -> ApiResult<User> {
        self.call(Endpoint::Profile, |ds| {
            ds.users
                .iter()
                .next()
                .cloned()
                .ok_or_else(|| ApiError::not_found("User"))
        })
        .await
    }

    async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        self.call(Endpoint::DashboardSummary, |ds| {
            Ok(DashboardSummary {
                stats: ds.dashboard.stats.clone(),
                recent_activity: ds.dashboard.recent_activity.clone(),
                alerts: ds.dashboard.alerts.clone(),
            })
        })
        .await
    }

    async fn dashboard_stats(&self) -> ApiResult<Vec<DashboardStat>> {
        self.call(Endpoint::DashboardStats, |ds| Ok(ds.dashboard.stats.clone()))
            .await
    }

    async fn dashboard_activity(&self, limit: Option<usize>) -> ApiResult<Vec<ActivityItem>> {
        self.call(Endpoint::DashboardActivity, |ds| {
            let items = &ds.dashboard.recent_activity;
            let n = limit.filter(|&l| l > 0).unwrap_or(items.len());
            Ok(items.iter().take(n).cloned().collect())
        })
        .await
    }

    async fn dashboard_trends(&self) -> ApiResult<TrendData> {
        self.call(Endpoint::DashboardTrends, |ds| Ok(ds.dashboard.trends.clone()))
            .await
    }

    async fn list_narratives(
        &self,
        criteria: &NarrativeFilter,
        page: Pagination,
    ) -> ApiResult<Page<Narrative>> {
        self.call(Endpoint::ListNarratives, |ds| {
            Ok(paginate(filter(ds.narratives.iter(), criteria), page))
        })
        .await
    }

    async fn narrative(&self, id: &str) -> ApiResult<Narrative> {
        self.call(Endpoint::Narrative, |ds| {
            lookup(&ds.narratives, id, "Narrative").cloned()
        })
        .await
    }

    async fn related_narratives(&self, id: &str) -> ApiResult<Vec<Narrative>> {
        self.call(Endpoint::RelatedNarratives, |ds| {
            let target = lookup(&ds.narratives, id, "Narrative")?;
            Ok(related_to(ds, target))
        })
        .await
    }

    async fn narrative_timeline(&self, id: &str) -> ApiResult<Vec<TimelineEvent>> {
        self.call(Endpoint::NarrativeTimeline, |ds| {
            lookup(&ds.narratives, id, "Narrative")?;
            let criteria = TimelineFilter {
                narrative_id: Some(id.to_string()),
                ..Default::default()
            };
            Ok(timeline_events(ds.timeline.iter(), &criteria))
        })
        .await
    }

    async fn create_narrative(&self, draft: &NarrativeDraft) -> ApiResult<Narrative> {
        self.call(Endpoint::CreateNarrative, |_| {
            let now = Utc::now();
            Ok(Narrative {
                id: self.ids.next("narrative"),
                title: draft.title.clone(),
                description: draft.description.clone(),
                category: draft.category,
                confidence: Score::saturating(0.0),
                first_detected: now,
                last_updated: now,
                content_count: 0,
                languages: draft.languages.clone(),
                volume: 0,
                trend: Trend::Stable,
                platforms: draft.platforms.clone(),
            })
        })
        .await
    }

    async fn update_narrative(&self, id: &str, patch: &NarrativePatch) -> ApiResult<Narrative> {
        self.call(Endpoint::UpdateNarrative, |ds| {
            let current = lookup(&ds.narratives, id, "Narrative")?;
            Ok(current.patched(patch, Utc::now()))
        })
        .await
    }

    async fn delete_narrative(&self, id: &str) -> ApiResult<Deleted> {
        self.call(Endpoint::DeleteNarrative, |ds| {
            lookup(&ds.narratives, id, "Narrative")?;
            Ok(Deleted {
                id: id.to_string(),
                deleted: true,
            })
        })
        .await
    }

    async fn list_actors(&self, criteria: &ActorFilter, page: Pagination) -> ApiResult<Page<Actor>> {
        self.call(Endpoint::ListActors, |ds| {
            Ok(paginate(filter(ds.actors.iter(), criteria), page))
        })
        .await
    }

    async fn actor(&self, id: &str) -> ApiResult<Actor> {
        self.call(Endpoint::Actor, |ds| lookup(&ds.actors, id, "Actor").cloned())
            .await
    }

    async fn actor_network(&self, id: &str) -> ApiResult<ActorNetwork> {
        self.call(Endpoint::ActorNetwork, |ds| {
            let actor = lookup(&ds.actors, id, "Actor")?;
            Ok(network_for(ds, actor))
        })
        .await
    }

    async fn actor_activity(&self, id: &str) -> ApiResult<ActorActivity> {
        self.call(Endpoint::ActorActivity, |ds| {
            let actor = lookup(&ds.actors, id, "Actor")?;
            Ok(activity_for(ds, actor))
        })
        .await
    }

    async fn list_alerts(&self, criteria: &AlertFilter, page: Pagination) -> ApiResult<Page<Alert>> {
        self.call(Endpoint::ListAlerts, |ds| {
            Ok(paginate(filter(ds.alerts.iter(), criteria), page))
        })
        .await
    }

    async fn alert(&self, id: &str) -> ApiResult<Alert> {
        self.call(Endpoint::Alert, |ds| lookup(&ds.alerts, id, "Alert").cloned())
            .await
    }

    async fn acknowledge_alert(&self, id: &str) -> ApiResult<AlertAcknowledgement> {
        self.call(Endpoint::AcknowledgeAlert, |ds| {
            lookup(&ds.alerts, id, "Alert")?;
            Ok(AlertAcknowledgement {
                id: id.to_string(),
                acknowledged: true,
            })
        })
        .await
    }

    async fn escalate_alert(&self, id: &str) -> ApiResult<AlertEscalation> {
        self.call(Endpoint::EscalateAlert, |ds| {
            lookup(&ds.alerts, id, "Alert")?;
            Ok(AlertEscalation {
                id: id.to_string(),
                escalated: true,
                severity: Severity::Critical,
            })
        })
        .await
    }

    async fn timeline(&self, criteria: &TimelineFilter) -> ApiResult<TimelineView> {
        self.call(Endpoint::Timeline, |ds| {
            Ok(TimelineView {
                events: timeline_events(ds.timeline.iter(), criteria),
                stats: ds.timeline_stats.clone(),
            })
        })
        .await
    }

    async fn list_reports(&self, criteria: &ReportFilter, page: Pagination) -> ApiResult<Page<Report>> {
        self.call(Endpoint::ListReports, |ds| {
            Ok(paginate(filter(ds.reports.iter(), criteria), page))
        })
        .await
    }

    async fn report(&self, id: &str) -> ApiResult<Report> {
        self.call(Endpoint::Report, |ds| lookup(&ds.reports, id, "Report").cloned())
            .await
    }

    async fn create_report(&self, request: &ReportRequest) -> ApiResult<Report> {
        self.call(Endpoint::CreateReport, |_| {
            Ok(generated_report(self.ids.next("report"), request))
        })
        .await
    }

    async fn export_report(&self, id: &str, format: ExportFormat) -> ApiResult<ExportTicket> {
        // Generated reports never enter the dataset, so any id is exportable.
        self.call(Endpoint::ExportReport, |_| {
            Ok(ExportTicket {
                id: id.to_string(),
                format,
                url: format!("{EXPORT_BASE_URL}/{id}.{format}"),
            })
        })
        .await
    }

    async fn lexicons(&self) -> ApiResult<Vec<Lexicon>> {
        self.call(Endpoint::Lexicons, |ds| Ok(ds.lexicons.as_slice().to_vec()))
            .await
    }

    async fn lexicon_terms(&self, language: &str) -> ApiResult<LexiconEntries> {
        self.call(Endpoint::LexiconTerms, |ds| {
            lookup(&ds.lexicons, language, "Lexicon")?;
            Ok(LexiconEntries {
                language: language.to_string(),
                terms: ds.lexicon_terms.clone(),
            })
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
