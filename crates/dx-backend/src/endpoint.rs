use dx_harness::profile::{EndpointProfile, DEFAULT_FAULT_PROBABILITY};

/// Fault probability for operations that create or change records.
pub const WRITE_FAULT_PROBABILITY: f64 = 0.10;

const GENERIC_FAULT: &str = "Network error occurred";

/// Every operation a data backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Logout,
    Profile,
    DashboardSummary,
    DashboardStats,
    DashboardActivity,
    DashboardTrends,
    ListNarratives,
    Narrative,
    RelatedNarratives,
    NarrativeTimeline,
    CreateNarrative,
    UpdateNarrative,
    DeleteNarrative,
    ListActors,
    Actor,
    ActorNetwork,
    ActorActivity,
    ListAlerts,
    Alert,
    AcknowledgeAlert,
    EscalateAlert,
    Timeline,
    ListReports,
    Report,
    CreateReport,
    ExportReport,
    Lexicons,
    LexiconTerms,
}

impl Endpoint {
    pub const ALL: [Endpoint; 29] = [
        Endpoint::Login,
        Endpoint::Logout,
        Endpoint::Profile,
        Endpoint::DashboardSummary,
        Endpoint::DashboardStats,
        Endpoint::DashboardActivity,
        Endpoint::DashboardTrends,
        Endpoint::ListNarratives,
        Endpoint::Narrative,
        Endpoint::RelatedNarratives,
        Endpoint::NarrativeTimeline,
        Endpoint::CreateNarrative,
        Endpoint::UpdateNarrative,
        Endpoint::DeleteNarrative,
        Endpoint::ListActors,
        Endpoint::Actor,
        Endpoint::ActorNetwork,
        Endpoint::ActorActivity,
        Endpoint::ListAlerts,
        Endpoint::Alert,
        Endpoint::AcknowledgeAlert,
        Endpoint::EscalateAlert,
        Endpoint::Timeline,
        Endpoint::ListReports,
        Endpoint::Report,
        Endpoint::CreateReport,
        Endpoint::ExportReport,
        Endpoint::Lexicons,
        Endpoint::LexiconTerms,
    ];

    /// Dotted name used in logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Login => "auth.login",
            Endpoint::Logout => "auth.logout",
            Endpoint::Profile => "auth.profile",
            Endpoint::DashboardSummary => "dashboard.summary",
            Endpoint::DashboardStats => "dashboard.stats",
            Endpoint::DashboardActivity => "dashboard.activity",
            Endpoint::DashboardTrends => "dashboard.trends",
            Endpoint::ListNarratives => "narratives.list",
            Endpoint::Narrative => "narratives.get",
            Endpoint::RelatedNarratives => "narratives.related",
            Endpoint::NarrativeTimeline => "narratives.timeline",
            Endpoint::CreateNarrative => "narratives.create",
            Endpoint::UpdateNarrative => "narratives.update",
            Endpoint::DeleteNarrative => "narratives.delete",
            Endpoint::ListActors => "actors.list",
            Endpoint::Actor => "actors.get",
            Endpoint::ActorNetwork => "actors.network",
            Endpoint::ActorActivity => "actors.activity",
            Endpoint::ListAlerts => "alerts.list",
            Endpoint::Alert => "alerts.get",
            Endpoint::AcknowledgeAlert => "alerts.acknowledge",
            Endpoint::EscalateAlert => "alerts.escalate",
            Endpoint::Timeline => "timeline.list",
            Endpoint::ListReports => "reports.list",
            Endpoint::Report => "reports.get",
            Endpoint::CreateReport => "reports.create",
            Endpoint::ExportReport => "reports.export",
            Endpoint::Lexicons => "lexicon.list",
            Endpoint::LexiconTerms => "lexicon.terms",
        }
    }

    fn latency_ms(&self) -> u64 {
        match self {
            Endpoint::Login => 800,
            Endpoint::Logout => 300,
            Endpoint::Profile => 500,
            Endpoint::DashboardSummary => 1000,
            Endpoint::DashboardStats => 700,
            Endpoint::DashboardActivity => 800,
            Endpoint::DashboardTrends => 1200,
            Endpoint::ListNarratives => 1000,
            Endpoint::Narrative => 800,
            Endpoint::RelatedNarratives => 900,
            Endpoint::NarrativeTimeline => 1100,
            Endpoint::CreateNarrative | Endpoint::UpdateNarrative => 1000,
            Endpoint::DeleteNarrative => 800,
            Endpoint::ListActors => 1000,
            Endpoint::Actor => 800,
            Endpoint::ActorNetwork => 1200,
            Endpoint::ActorActivity => 900,
            Endpoint::ListAlerts => 800,
            Endpoint::Alert => 600,
            Endpoint::AcknowledgeAlert | Endpoint::EscalateAlert => 500,
            Endpoint::Timeline => 1000,
            Endpoint::ListReports => 800,
            Endpoint::Report => 700,
            Endpoint::CreateReport => 2000,
            Endpoint::ExportReport => 1500,
            Endpoint::Lexicons => 1000,
            Endpoint::LexiconTerms => 800,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Endpoint::CreateNarrative
                | Endpoint::UpdateNarrative
                | Endpoint::DeleteNarrative
                | Endpoint::CreateReport
        )
    }

    /// Default latency and fault probability for this endpoint.
    pub fn profile(&self) -> EndpointProfile {
        let p = if self.is_write() {
            WRITE_FAULT_PROBABILITY
        } else {
            DEFAULT_FAULT_PROBABILITY
        };
        EndpointProfile::new(self.latency_ms(), p)
    }

    /// Message carried by an injected failure.
    pub fn fault_message(&self) -> &'static str {
        match self {
            Endpoint::Profile => "Failed to fetch user profile",
            Endpoint::DashboardSummary => "Failed to fetch dashboard summary",
            Endpoint::DashboardTrends => "Failed to fetch trend data",
            Endpoint::CreateReport => "Failed to generate report",
            _ => GENERIC_FAULT,
        }
    }
}
