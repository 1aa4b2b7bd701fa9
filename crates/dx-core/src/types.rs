use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Closed enumerations
// ---------------------------------------------------------------------------

/// Error returned when parsing an enumeration from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed enumeration with a fixed wire spelling per variant,
/// plus `as_str`, `Display` and a lenient `FromStr` (case-insensitive,
/// `-` accepted for `_`).
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().replace('-', "_");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(&wanted))
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_enum! {
    /// Taxonomy of tracked narratives.
    NarrativeCategory, "narrative category" {
        VoteRigging => "VOTE_RIGGING",
        EthnicProfiling => "ETHNIC_PROFILING",
        CandidateImpersonation => "CANDIDATE_IMPERSONATION",
        VoterIntimidation => "VOTER_INTIMIDATION",
        ProceduralMisinformation => "PROCEDURAL_MISINFORMATION",
        ForeignInterference => "FOREIGN_INTERFERENCE",
    }
}

// BTreeMap keys in `TrendData` need an ordering; declaration order is fine.
impl PartialOrd for NarrativeCategory {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NarrativeCategory {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

wire_enum! {
    Trend, "trend" {
        Increasing => "increasing",
        Stable => "stable",
        Decreasing => "decreasing",
    }
}

wire_enum! {
    ActorType, "actor type" {
        Individual => "INDIVIDUAL",
        Organization => "ORGANIZATION",
        Network => "NETWORK",
        Media => "MEDIA",
    }
}

wire_enum! {
    ActivityLevel, "activity level" {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

wire_enum! {
    /// Alert severity. Ordered `Low < Medium < High < Critical`.
    Severity, "severity" {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

impl Severity {
    fn rank(self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

wire_enum! {
    AlertType, "alert type" {
        VolumeSpike => "VOLUME_SPIKE",
        NewNarrative => "NEW_NARRATIVE",
        NewInfluencer => "NEW_INFLUENCER",
        CoordinatedActivity => "COORDINATED_ACTIVITY",
        GeographicShift => "GEOGRAPHIC_SHIFT",
    }
}

wire_enum! {
    /// Kind of report requested from the report builder.
    ReportKind, "report type" {
        Narrative => "narrative",
        Actor => "actor",
        Trend => "trend",
        Summary => "summary",
        Comprehensive => "comprehensive",
    }
}

impl ReportKind {
    /// Human-readable title stored on generated reports.
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Narrative => "Narrative Analysis",
            ReportKind::Actor => "Actor Network Analysis",
            ReportKind::Trend => "Trend Analysis",
            ReportKind::Summary => "Executive Summary",
            ReportKind::Comprehensive => "Comprehensive Report",
        }
    }
}

wire_enum! {
    ExportFormat, "export format" {
        Pdf => "pdf",
        Docx => "docx",
        Csv => "csv",
        Json => "json",
        Pptx => "pptx",
    }
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("score {0} is outside [0, 1]")]
pub struct ScoreError(pub f64);

/// A confidence or influence value, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, ScoreError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreError(value))
        }
    }

    /// Clamp into range; NaN becomes zero.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = ScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verified-account flag. On the wire: `true`, `false` or `"MIXED"` (for
/// networks spanning verified and unverified accounts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Unverified,
    Mixed,
}

impl Serialize for Verification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Verification::Verified => serializer.serialize_bool(true),
            Verification::Unverified => serializer.serialize_bool(false),
            Verification::Mixed => serializer.serialize_str("MIXED"),
        }
    }
}

impl<'de> Deserialize<'de> for Verification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(Verification::Verified),
            Raw::Flag(false) => Ok(Verification::Unverified),
            Raw::Label(s) if s.eq_ignore_ascii_case("mixed") => Ok(Verification::Mixed),
            Raw::Label(s) => Err(serde::de::Error::custom(format!(
                "unknown verification `{s}`"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Identified
// ---------------------------------------------------------------------------

/// Entities addressable by a string identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: NarrativeCategory,
    pub confidence: Score,
    pub first_detected: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub content_count: u64,
    pub languages: Vec<String>,
    pub volume: u64,
    pub trend: Trend,
    pub platforms: Vec<String>,
}

/// Caller-supplied fields for a new narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: NarrativeCategory,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NarrativeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
}

impl Narrative {
    /// Return a copy with `patch` applied and `last_updated` bumped.
    pub fn patched(&self, patch: &NarrativePatch, now: DateTime<Utc>) -> Narrative {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(trend) = patch.trend {
            next.trend = trend;
        }
        if let Some(languages) = &patch.languages {
            next.languages = languages.clone();
        }
        if let Some(platforms) = &patch.platforms {
            next.platforms = platforms.clone();
        }
        next.last_updated = now;
        next
    }
}

/// Acknowledgement for a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// Platform value used by actors active on more than one platform.
pub const MULTIPLE_PLATFORMS: &str = "MULTIPLE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub actor_type: ActorType,
    pub platform: String,
    pub influence: Score,
    pub followers: u64,
    pub verified: Verification,
    pub activity: ActivityLevel,
    pub coordinated: bool,
    pub first_detected: DateTime<Utc>,
    pub narratives: Vec<String>,
    pub location: String,
}

impl Actor {
    /// Narrative ids this actor shares with `other`, in this actor's order.
    pub fn shared_narratives(&self, other: &Actor) -> Vec<String> {
        self.narratives
            .iter()
            .filter(|n| other.narratives.contains(n))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Primary,
    Related,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    pub strength: Score,
    pub narratives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorNetwork {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub platform: String,
    pub timestamp: DateTime<Utc>,
    pub engagement: Engagement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeShare {
    pub id: String,
    pub title: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorActivity {
    pub volume_by_day: Vec<DailyCount>,
    pub narrative_distribution: Vec<NarrativeShare>,
    pub recent_posts: Vec<Post>,
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub timestamp: DateTime<Utc>,
    pub is_acknowledged: bool,
    #[serde(default)]
    pub related_narratives: Vec<String>,
    #[serde(default)]
    pub related_actors: Vec<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAcknowledgement {
    pub id: String,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEscalation {
    pub id: String,
    pub escalated: bool,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub platforms: Vec<String>,
    pub narrative_id: String,
    #[serde(default)]
    pub actor_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStats {
    pub total_events: u32,
    pub platforms: u32,
    pub peak_activity: String,
    pub spread_velocity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub events: Vec<TimelineEvent>,
    pub stats: TimelineStats,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visualization {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub summary: String,
    pub key_findings: Vec<String>,
    #[serde(default)]
    pub visualizations: Vec<Visualization>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Parameters accepted by the report builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub title: String,
    #[serde(rename = "type", default = "default_report_kind")]
    pub report_type: ReportKind,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    #[serde(default)]
    pub narrative_ids: Vec<String>,
    #[serde(default)]
    pub actor_ids: Vec<String>,
    #[serde(default = "default_true")]
    pub include_charts: bool,
    #[serde(default)]
    pub include_raw_data: bool,
    #[serde(default = "default_true")]
    pub include_recommendations: bool,
}

impl ReportRequest {
    pub fn new(title: impl Into<String>, report_type: ReportKind) -> Self {
        Self {
            title: title.into(),
            report_type,
            timeframe: default_timeframe(),
            narrative_ids: Vec::new(),
            actor_ids: Vec::new(),
            include_charts: true,
            include_raw_data: false,
            include_recommendations: true,
        }
    }
}

fn default_report_kind() -> ReportKind {
    ReportKind::Narrative
}
fn default_timeframe() -> String {
    "week".into()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTicket {
    pub id: String,
    pub format: ExportFormat,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub role: String,
    #[serde(default)]
    pub regions: Vec<String>,
    pub is_active: bool,
    pub last_login: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login: the user record plus a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    pub user: User,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStat {
    pub title: String,
    pub value: String,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub icon: String,
    pub icon_bg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub id: String,
    pub title: String,
    pub time: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: Vec<DashboardStat>,
    pub recent_activity: Vec<ActivityItem>,
    pub alerts: Vec<AlertSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendData {
    pub narratives: Vec<DailyCount>,
    pub platforms: BTreeMap<String, u32>,
    pub categories: BTreeMap<NarrativeCategory, u32>,
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lexicon {
    pub id: String,
    pub name: String,
    pub description: String,
    pub term_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconTerm {
    pub term: String,
    pub category: NarrativeCategory,
    pub translations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntries {
    pub language: String,
    pub terms: Vec<LexiconTerm>,
}

identified!(
    Narrative,
    Actor,
    Alert,
    TimelineEvent,
    Report,
    User,
    ActivityItem,
    Lexicon,
);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
