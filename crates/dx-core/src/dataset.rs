//! Read-only seed dataset shared by every mock endpoint.
//!
//! All collections are built once from literal definitions and never
//! mutated; demo actions that "change" data produce new values instead.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::types::*;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("duplicate {collection} id `{id}`")]
    DuplicateId { collection: &'static str, id: String },
    #[error("invalid seed timestamp `{0}`")]
    Timestamp(String),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Insertion-ordered records indexed by identifier.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    name: &'static str,
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Identified> Collection<T> {
    /// Build a collection, rejecting duplicate identifiers.
    pub fn new(name: &'static str, items: Vec<T>) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id().to_string(), pos).is_some() {
                return Err(DatasetError::DuplicateId {
                    collection: name,
                    id: item.id().to_string(),
                });
            }
        }
        Ok(Self { name, items, index })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Dashboard widgets backed by literal data rather than a collection.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub stats: Vec<DashboardStat>,
    pub recent_activity: Vec<ActivityItem>,
    pub alerts: Vec<AlertSummary>,
    pub trends: TrendData,
}

/// Canned posts and daily volume used by actor activity views.
#[derive(Debug, Clone)]
pub struct ActivityData {
    pub volume_by_day: Vec<DailyCount>,
    pub recent_posts: Vec<Post>,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub narratives: Collection<Narrative>,
    pub actors: Collection<Actor>,
    pub alerts: Collection<Alert>,
    pub timeline: Collection<TimelineEvent>,
    pub timeline_stats: TimelineStats,
    pub reports: Collection<Report>,
    pub users: Collection<User>,
    pub dashboard: DashboardData,
    pub activity: ActivityData,
    pub lexicons: Collection<Lexicon>,
    pub lexicon_terms: Vec<LexiconTerm>,
}

/// The process-wide seed dataset, built on first use.
pub fn seed_dataset() -> Result<Arc<Dataset>, DatasetError> {
    static SEED: OnceLock<Arc<Dataset>> = OnceLock::new();
    if let Some(ds) = SEED.get() {
        return Ok(ds.clone());
    }
    let ds = Arc::new(Dataset::seed()?);
    Ok(SEED.get_or_init(|| ds).clone())
}

fn ts(raw: &str) -> Result<DateTime<Utc>, DatasetError> {
    raw.parse::<DateTime<Utc>>()
        .map_err(|_| DatasetError::Timestamp(raw.to_string()))
}

fn day(raw: &str) -> Result<NaiveDate, DatasetError> {
    raw.parse::<NaiveDate>()
        .map_err(|_| DatasetError::Timestamp(raw.to_string()))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn daily(points: &[(&str, u64)]) -> Result<Vec<DailyCount>, DatasetError> {
    points
        .iter()
        .map(|(date, count)| {
            Ok(DailyCount {
                date: day(date)?,
                count: *count,
            })
        })
        .collect()
}

impl Dataset {
    /// Build the seed dataset from its literal definition.
    pub fn seed() -> Result<Self, DatasetError> {
        let ds = Self {
            narratives: Collection::new("narrative", seed_narratives()?)?,
            actors: Collection::new("actor", seed_actors()?)?,
            alerts: Collection::new("alert", seed_alerts()?)?,
            timeline: Collection::new("timeline event", seed_timeline()?)?,
            timeline_stats: TimelineStats {
                total_events: 24,
                platforms: 6,
                peak_activity: "14:20".into(),
                spread_velocity: "High".into(),
            },
            reports: Collection::new("report", seed_reports()?)?,
            users: Collection::new("user", seed_users()?)?,
            dashboard: seed_dashboard()?,
            activity: seed_activity()?,
            lexicons: Collection::new("lexicon", seed_lexicons())?,
            lexicon_terms: seed_lexicon_terms(),
        };
        tracing::debug!(
            narratives = ds.narratives.len(),
            actors = ds.actors.len(),
            alerts = ds.alerts.len(),
            reports = ds.reports.len(),
            "seed dataset built"
        );
        Ok(ds)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }
}

// ---------------------------------------------------------------------------
// Seed definitions
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn narrative(
    id: &str,
    title: &str,
    description: &str,
    category: NarrativeCategory,
    confidence: f64,
    (first, last): (&str, &str),
    volume: u64,
    languages: &[&str],
    trend: Trend,
    platforms: &[&str],
) -> Result<Narrative, DatasetError> {
    Ok(Narrative {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category,
        confidence: Score::new(confidence)?,
        first_detected: ts(first)?,
        last_updated: ts(last)?,
        content_count: volume,
        languages: strings(languages),
        volume,
        trend,
        platforms: strings(platforms),
    })
}

fn seed_narratives() -> Result<Vec<Narrative>, DatasetError> {
    use NarrativeCategory::*;
    Ok(vec![
        narrative(
            "1",
            "Ballot stuffing in Lagos polling stations",
            "Claims that electoral officials are stuffing ballot boxes in Lagos state",
            VoteRigging,
            0.87,
            ("2025-05-12T08:30:00Z", "2025-05-12T10:15:00Z"),
            342,
            &["en", "pcm"],
            Trend::Increasing,
            &["twitter", "facebook", "whatsapp"],
        )?,
        narrative(
            "2",
            "Ethnic profiling at northern polling stations",
            "Claims that voters from certain ethnic groups are being prevented from voting",
            EthnicProfiling,
            0.92,
            ("2025-05-12T07:45:00Z", "2025-05-12T11:30:00Z"),
            267,
            &["en", "ha"],
            Trend::Stable,
            &["twitter", "telegram", "whatsapp"],
        )?,
        narrative(
            "3",
            "Fake presidential statement on election postponement",
            "Fabricated statement claiming the president has postponed the election",
            CandidateImpersonation,
            0.95,
            ("2025-05-12T09:15:00Z", "2025-05-12T12:00:00Z"),
            189,
            &["en"],
            Trend::Decreasing,
            &["twitter", "facebook", "youtube"],
        )?,
        narrative(
            "4",
            "Armed groups threatening voters in eastern regions",
            "Reports of armed groups intimidating voters at polling stations",
            VoterIntimidation,
            0.78,
            ("2025-05-12T10:00:00Z", "2025-05-12T13:45:00Z"),
            156,
            &["en", "ig"],
            Trend::Increasing,
            &["twitter", "facebook", "whatsapp"],
        )?,
        narrative(
            "5",
            "False claims about changed voting procedures",
            "Misinformation about last-minute changes to voting procedures",
            ProceduralMisinformation,
            0.89,
            ("2025-05-12T08:00:00Z", "2025-05-12T14:30:00Z"),
            231,
            &["en", "pcm", "yo"],
            Trend::Stable,
            &["twitter", "facebook", "tiktok"],
        )?,
    ])
}

struct ActorSeed<'a> {
    id: &'a str,
    name: &'a str,
    actor_type: ActorType,
    platform: &'a str,
    influence: f64,
    followers: u64,
    verified: Verification,
    activity: ActivityLevel,
    coordinated: bool,
    first_detected: &'a str,
    narratives: &'a [&'a str],
    location: &'a str,
}

impl ActorSeed<'_> {
    fn build(self) -> Result<Actor, DatasetError> {
        Ok(Actor {
            id: self.id.into(),
            name: self.name.into(),
            actor_type: self.actor_type,
            platform: self.platform.into(),
            influence: Score::new(self.influence)?,
            followers: self.followers,
            verified: self.verified,
            activity: self.activity,
            coordinated: self.coordinated,
            first_detected: ts(self.first_detected)?,
            narratives: strings(self.narratives),
            location: self.location.into(),
        })
    }
}

fn seed_actors() -> Result<Vec<Actor>, DatasetError> {
    [
        ActorSeed {
            id: "1",
            name: "@election_truth",
            actor_type: ActorType::Individual,
            platform: "TWITTER_X",
            influence: 0.85,
            followers: 50_000,
            verified: Verification::Verified,
            activity: ActivityLevel::High,
            coordinated: true,
            first_detected: "2025-05-10T14:30:00Z",
            narratives: &["1", "3"],
            location: "Unknown",
        },
        ActorSeed {
            id: "2",
            name: "Nigeria Election Watch",
            actor_type: ActorType::Organization,
            platform: "FACEBOOK",
            influence: 0.92,
            followers: 75_000,
            verified: Verification::Verified,
            activity: ActivityLevel::High,
            coordinated: false,
            first_detected: "2025-05-01T09:15:00Z",
            narratives: &["2", "5"],
            location: "Lagos, Nigeria",
        },
        ActorSeed {
            id: "3",
            name: "@truth_seeker_ng",
            actor_type: ActorType::Individual,
            platform: "TWITTER_X",
            influence: 0.67,
            followers: 12_000,
            verified: Verification::Unverified,
            activity: ActivityLevel::Medium,
            coordinated: true,
            first_detected: "2025-05-11T16:45:00Z",
            narratives: &["1", "4"],
            location: "Abuja, Nigeria",
        },
        ActorSeed {
            id: "4",
            name: "Election Alert Network",
            actor_type: ActorType::Network,
            platform: MULTIPLE_PLATFORMS,
            influence: 0.88,
            followers: 120_000,
            verified: Verification::Mixed,
            activity: ActivityLevel::High,
            coordinated: true,
            first_detected: "2025-05-09T11:30:00Z",
            narratives: &["1", "2", "4"],
            location: "Multiple",
        },
        ActorSeed {
            id: "5",
            name: "@political_insider",
            actor_type: ActorType::Individual,
            platform: "TWITTER_X",
            influence: 0.79,
            followers: 35_000,
            verified: Verification::Verified,
            activity: ActivityLevel::High,
            coordinated: false,
            first_detected: "2025-05-10T08:20:00Z",
            narratives: &["3", "5"],
            location: "Lagos, Nigeria",
        },
    ]
    .into_iter()
    .map(ActorSeed::build)
    .collect()
}

struct AlertSeed<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    severity: Severity,
    alert_type: AlertType,
    timestamp: &'a str,
    related_narratives: &'a [&'a str],
    related_actors: &'a [&'a str],
    recommended_actions: &'a [&'a str],
}

impl AlertSeed<'_> {
    fn build(self) -> Result<Alert, DatasetError> {
        Ok(Alert {
            id: self.id.into(),
            title: self.title.into(),
            description: self.description.into(),
            severity: self.severity,
            alert_type: self.alert_type,
            timestamp: ts(self.timestamp)?,
            is_acknowledged: false,
            related_narratives: strings(self.related_narratives),
            related_actors: strings(self.related_actors),
            recommended_actions: strings(self.recommended_actions),
        })
    }
}

fn seed_alerts() -> Result<Vec<Alert>, DatasetError> {
    [
        AlertSeed {
            id: "1",
            title: "Sudden spike in 'ballot stuffing' narrative",
            description: "Volume increased by 450% in the last hour across Twitter and Facebook",
            severity: Severity::Critical,
            alert_type: AlertType::VolumeSpike,
            timestamp: "2025-05-12T14:30:00Z",
            related_narratives: &[
                "Ballot stuffing in Lagos polling stations",
                "Electoral commission corruption allegations",
            ],
            related_actors: &[
                "@election_truth (50K followers)",
                "@nigeria_watchdog (35K followers)",
            ],
            recommended_actions: &[
                "Monitor related hashtags #NigeriaDecides2025 and #LagosVotes",
                "Track geographic spread of narrative",
                "Identify original sources and verify claims",
                "Alert fact-checking partners",
            ],
        },
        AlertSeed {
            id: "2",
            title: "New coordinated network detected",
            description: "15 accounts showing synchronized posting patterns around election fraud claims",
            severity: Severity::High,
            alert_type: AlertType::CoordinatedActivity,
            timestamp: "2025-05-12T13:45:00Z",
            related_narratives: &[
                "Election officials compromised",
                "Foreign interference in voting process",
            ],
            related_actors: &[
                "Network of 15 accounts created in the last 30 days",
                "Central node: @truth_seeker_ng",
            ],
            recommended_actions: &[
                "Analyze account creation patterns and relationships",
                "Document coordinated posting behavior",
                "Report to platform for potential violation of terms",
                "Monitor for network expansion",
            ],
        },
        AlertSeed {
            id: "3",
            title: "New influential actor promoting misinformation",
            description: "Verified account with 120K followers sharing manipulated polling station video",
            severity: Severity::Medium,
            alert_type: AlertType::NewInfluencer,
            timestamp: "2025-05-12T12:15:00Z",
            related_narratives: &[
                "Voter intimidation in northern regions",
                "Ethnic targeting at polling stations",
            ],
            related_actors: &["@political_insider (120K followers, verified)"],
            recommended_actions: &[
                "Analyze account history and recent activity patterns",
                "Document reach and engagement of manipulated content",
                "Identify original source of manipulated video",
                "Contact platform about potential policy violation",
            ],
        },
        AlertSeed {
            id: "4",
            title: "Geographic shift in narrative spread",
            description: "Ethnic tension narrative spreading from online spaces to on-ground incidents",
            severity: Severity::High,
            alert_type: AlertType::GeographicShift,
            timestamp: "2025-05-12T11:00:00Z",
            related_narratives: &[
                "Ethnic profiling at polling stations",
                "Targeted voter suppression",
            ],
            related_actors: &[
                "Multiple local community groups",
                "Regional political influencers",
            ],
            recommended_actions: &[
                "Alert local observers in affected regions",
                "Track geographic correlation between online narrative and incidents",
                "Identify key amplifiers in transition from online to offline",
                "Prepare counter-messaging resources for local partners",
            ],
        },
    ]
    .into_iter()
    .map(AlertSeed::build)
    .collect()
}

fn seed_timeline() -> Result<Vec<TimelineEvent>, DatasetError> {
    let events: [(&str, &str, &str, &str, &[&str], &[&str]); 6] = [
        (
            "1",
            "2025-05-12T09:15:00Z",
            "New narrative emerged: 'Ballot box stuffing in Lagos'",
            "First detected on Twitter, quickly spread to Facebook and WhatsApp groups",
            &["Twitter", "Facebook", "WhatsApp"],
            &["1", "3"],
        ),
        (
            "2",
            "2025-05-12T10:30:00Z",
            "Key influencer amplification",
            "Narrative picked up by @election_truth with 50K followers",
            &["Twitter"],
            &["1"],
        ),
        (
            "3",
            "2025-05-12T12:45:00Z",
            "Content manipulation detected",
            "Original video edited to remove context, showing only partial events",
            &["TikTok", "YouTube"],
            &["3", "5"],
        ),
        (
            "4",
            "2025-05-12T14:20:00Z",
            "Coordinated sharing pattern identified",
            "15 accounts sharing identical content within 5 minute window",
            &["Facebook", "Twitter"],
            &["4"],
        ),
        (
            "5",
            "2025-05-12T16:00:00Z",
            "Counter-narrative emerges",
            "Election officials release full video showing proper procedures",
            &["Official Website", "Twitter"],
            &[],
        ),
        (
            "6",
            "2025-05-12T18:30:00Z",
            "Fact-checking organization verification",
            "Africa Check labels original claim as 'Misleading'",
            &["Africa Check", "Twitter"],
            &[],
        ),
    ];

    events
        .into_iter()
        .map(|(id, date, title, description, platforms, actors)| {
            Ok(TimelineEvent {
                id: id.into(),
                date: ts(date)?,
                title: title.into(),
                description: description.into(),
                platforms: strings(platforms),
                narrative_id: "1".into(),
                actor_ids: strings(actors),
            })
        })
        .collect()
}

fn visuals(items: &[(&str, &str)]) -> Vec<Visualization> {
    items
        .iter()
        .map(|(title, description)| Visualization {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

fn seed_reports() -> Result<Vec<Report>, DatasetError> {
    Ok(vec![
        Report {
            id: "1".into(),
            title: "Weekly Misinformation Trends Report".into(),
            report_type: ReportKind::Trend.label().into(),
            created_at: ts("2025-05-12T00:00:00Z")?,
            created_by: "John Doe".into(),
            summary: "This report provides an analysis of key misinformation trends observed during the past week leading up to the Nigerian presidential election. It highlights emerging narratives, influential actors, and recommended intervention strategies.".into(),
            key_findings: strings(&[
                "Significant increase (35%) in vote rigging narratives across platforms",
                "Coordinated network of 24 accounts spreading ethnic tension narratives",
                "Regional concentration of voter intimidation claims in northern states",
                "Cross-platform amplification pattern from Twitter to Facebook to WhatsApp",
            ]),
            visualizations: visuals(&[
                ("Narrative Volume by Platform", "Comparison of narrative prevalence across different social media platforms"),
                ("Geographic Distribution of Narratives", "Heat map showing concentration of misinformation narratives by region"),
                ("Temporal Spread Pattern", "Timeline showing how narratives evolved and spread over time"),
                ("Key Actor Network", "Network graph showing relationships between influential spreaders"),
            ]),
            recommendations: strings(&[
                "Focus fact-checking efforts on vote rigging claims, particularly in Lagos and Kano",
                "Monitor the identified coordinated network for new narrative introduction",
                "Deploy targeted counter-messaging in northern regions addressing voter intimidation concerns",
                "Engage with platform representatives about the cross-platform amplification pattern",
            ]),
        },
        Report {
            id: "2".into(),
            title: "Ballot Stuffing Narrative Analysis".into(),
            report_type: ReportKind::Narrative.label().into(),
            created_at: ts("2025-05-10T00:00:00Z")?,
            created_by: "Jane Smith".into(),
            summary: "Detailed analysis of the 'ballot stuffing' narrative that emerged on May 9th and rapidly spread across multiple platforms. This report examines the origin, spread patterns, key amplifiers, and impact of this specific narrative.".into(),
            key_findings: strings(&[
                "Narrative originated from a manipulated video shared by @election_truth",
                "Spread to 15,000+ shares within 6 hours of initial posting",
                "Amplified by 3 verified accounts with combined following of 500K+",
                "Generated 28 derivative narratives focusing on specific polling stations",
            ]),
            visualizations: visuals(&[
                ("Narrative Spread Timeline", "Hour-by-hour spread of the ballot stuffing narrative"),
                ("Key Amplifier Network", "Network of accounts that significantly boosted the narrative reach"),
            ]),
            recommendations: strings(&[
                "Prioritize fact-checking of the original manipulated video",
                "Engage with verified accounts that amplified the narrative",
                "Monitor for similar narrative patterns at other polling locations",
                "Prepare counter-narrative resources for election officials",
            ]),
        },
        Report {
            id: "3".into(),
            title: "Coordinated Inauthentic Behavior Report".into(),
            report_type: ReportKind::Actor.label().into(),
            created_at: ts("2025-05-08T00:00:00Z")?,
            created_by: "Alex Johnson".into(),
            summary: "This report documents a network of accounts exhibiting coordinated inauthentic behavior around election integrity narratives. It analyzes account creation patterns, posting behaviors, content sharing patterns, and network relationships.".into(),
            key_findings: strings(&[
                "Network of 37 accounts created within the same 48-hour period",
                "Synchronized posting patterns with 92% content similarity",
                "Targeting of 5 specific electoral regions with tailored messaging",
                "Evidence of automation in posting schedule and response patterns",
            ]),
            visualizations: visuals(&[
                ("Account Creation Timeline", "Clustering of account creation dates showing coordinated setup"),
                ("Content Similarity Matrix", "Heat map showing content similarity between accounts in the network"),
            ]),
            recommendations: strings(&[
                "Report network to platform trust and safety teams with supporting evidence",
                "Monitor for network reconstitution if accounts are removed",
                "Track narrative shifts from this network as a leading indicator",
                "Document tactics for future reference and training",
            ]),
        },
    ])
}

fn seed_users() -> Result<Vec<User>, DatasetError> {
    Ok(vec![User {
        id: "user-123".into(),
        name: "Demo User".into(),
        email: "demo@example.com".into(),
        organization: "Election Watch".into(),
        role: "RESEARCHER".into(),
        regions: strings(&["Lagos", "Abuja"]),
        is_active: true,
        last_login: ts("2025-05-12T08:00:00Z")?,
    }])
}

fn seed_dashboard() -> Result<DashboardData, DatasetError> {
    let stat = |title: &str, value: &str, color: &str, icon: &str| DashboardStat {
        title: title.into(),
        value: value.into(),
        color: color.into(),
        icon: icon.into(),
    };
    let activity = |id: &str, title: &str, description: &str, time: &str, icon: &str, bg: &str| {
        ActivityItem {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            time: time.into(),
            icon: icon.into(),
            icon_bg: bg.into(),
        }
    };
    let alert = |id: &str, title: &str, time: &str, severity| AlertSummary {
        id: id.into(),
        title: title.into(),
        time: time.into(),
        severity,
    };

    let platforms: BTreeMap<String, u32> = [
        ("twitter", 42),
        ("facebook", 28),
        ("whatsapp", 15),
        ("telegram", 8),
        ("tiktok", 5),
        ("youtube", 2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let categories: BTreeMap<NarrativeCategory, u32> = [
        (NarrativeCategory::VoteRigging, 35),
        (NarrativeCategory::EthnicProfiling, 25),
        (NarrativeCategory::CandidateImpersonation, 15),
        (NarrativeCategory::VoterIntimidation, 15),
        (NarrativeCategory::ProceduralMisinformation, 10),
    ]
    .into_iter()
    .collect();

    Ok(DashboardData {
        stats: vec![
            stat("Active Narratives", "28", "bg-blue-100 text-blue-600", "narratives"),
            stat("Flagged Actors", "47", "bg-red-100 text-red-600", "actors"),
            stat("New Alerts", "5", "bg-yellow-100 text-yellow-600", "alerts"),
            stat("Data Freshness", "12m", "bg-green-100 text-green-600", "clock"),
        ],
        recent_activity: vec![
            activity(
                "1",
                "New narrative detected",
                "Vote rigging claims in Lagos state polling stations",
                "10 minutes ago",
                "alert",
                "bg-blue-500",
            ),
            activity(
                "2",
                "High activity actor detected",
                "User @election_truth showing coordinated behavior with 12 other accounts",
                "25 minutes ago",
                "user",
                "bg-red-500",
            ),
            activity(
                "3",
                "Narrative volume spike",
                "Ethnic profiling narrative increased by 230% in the last hour",
                "45 minutes ago",
                "chart",
                "bg-yellow-500",
            ),
            activity(
                "4",
                "New fact-check published",
                "Africa Check verified claims about ballot paper shortages",
                "1 hour ago",
                "check",
                "bg-green-500",
            ),
        ],
        alerts: vec![
            alert(
                "1",
                "Sudden spike in 'ballot stuffing' narrative",
                "15 minutes ago",
                Severity::Critical,
            ),
            alert(
                "2",
                "New coordinated network detected",
                "45 minutes ago",
                Severity::High,
            ),
            alert(
                "3",
                "New influential actor promoting misinformation",
                "2 hours ago",
                Severity::Medium,
            ),
        ],
        trends: TrendData {
            narratives: daily(&[
                ("2025-05-06", 120),
                ("2025-05-07", 145),
                ("2025-05-08", 132),
                ("2025-05-09", 167),
                ("2025-05-10", 189),
                ("2025-05-11", 214),
                ("2025-05-12", 342),
            ])?,
            platforms,
            categories,
        },
    })
}

fn seed_activity() -> Result<ActivityData, DatasetError> {
    let post = |id: &str, content: &str, platform: &str, at: &str, (likes, shares, comments): (u64, u64, u64)| {
        Ok::<_, DatasetError>(Post {
            id: id.into(),
            content: content.into(),
            platform: platform.into(),
            timestamp: ts(at)?,
            engagement: Engagement {
                likes,
                shares,
                comments,
            },
        })
    };

    Ok(ActivityData {
        volume_by_day: daily(&[
            ("2025-05-06", 12),
            ("2025-05-07", 18),
            ("2025-05-08", 15),
            ("2025-05-09", 24),
            ("2025-05-10", 32),
            ("2025-05-11", 28),
            ("2025-05-12", 45),
        ])?,
        recent_posts: vec![
            post(
                "1",
                "Breaking: Evidence of ballot stuffing in Lagos polling stations! #NigeriaDecides2025",
                "TWITTER_X",
                "2025-05-12T14:30:00Z",
                (245, 132, 67),
            )?,
            post(
                "2",
                "Officials caught on camera manipulating votes. Share this before it gets taken down!",
                "FACEBOOK",
                "2025-05-12T15:15:00Z",
                (189, 95, 42),
            )?,
            post(
                "3",
                "Election commission refusing to address fraud allegations. What are they hiding?",
                "TWITTER_X",
                "2025-05-12T16:45:00Z",
                (312, 178, 89),
            )?,
        ],
    })
}

fn seed_lexicons() -> Vec<Lexicon> {
    [
        ("en", "English", "Standard English lexicon for election misinformation", 245),
        ("pcm", "Nigerian Pidgin", "Nigerian Pidgin English lexicon for election misinformation", 187),
        ("ha", "Hausa", "Hausa language lexicon for election misinformation", 156),
        ("yo", "Yoruba", "Yoruba language lexicon for election misinformation", 142),
        ("ig", "Igbo", "Igbo language lexicon for election misinformation", 128),
    ]
    .into_iter()
    .map(|(id, name, description, term_count)| Lexicon {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        term_count,
    })
    .collect()
}

fn seed_lexicon_terms() -> Vec<LexiconTerm> {
    let term = |term: &str, category, translations: [(&str, &str); 4]| LexiconTerm {
        term: term.into(),
        category,
        translations: translations
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };

    vec![
        term(
            "ballot stuffing",
            NarrativeCategory::VoteRigging,
            [
                ("pcm", "ballot padding"),
                ("ha", "cika ƙuri'a"),
                ("yo", "fifi ibo sinu apoti"),
                ("ig", "ịkpọnye vootu"),
            ],
        ),
        term(
            "voter intimidation",
            NarrativeCategory::VoterIntimidation,
            [
                ("pcm", "voter fear fear"),
                ("ha", "tsoratarwa mai zabe"),
                ("yo", "ìdẹ́rùbà awọn aláṣẹ"),
                ("ig", "ịtụ egwu ndị ntuli aka"),
            ],
        ),
        term(
            "fake results",
            NarrativeCategory::ProceduralMisinformation,
            [
                ("pcm", "fake result"),
                ("ha", "sakamakon karya"),
                ("yo", "àwọn èsì èké"),
                ("ig", "nsonaazụ ụgha"),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
