mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dx_core::config::{BackendMode, Config};
use dx_core::types::{
    ActorType, AlertType, ExportFormat, NarrativeCategory, ReportKind, Severity,
};
use dx_telemetry::logging::{self, LogFormat};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// dexter -- browse election misinformation narratives, actors and alerts.
#[derive(Parser)]
#[command(name = "dexter", version, about)]
struct Cli {
    /// Config file (default: ~/.dexter/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend to use, overriding config: mock or http.
    #[arg(long, global = true)]
    mode: Option<BackendMode>,

    /// REST API base URL for http mode.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Skip simulated latency in mock mode.
    #[arg(long, global = true)]
    fast: bool,

    /// Print raw JSON instead of formatted text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at the configured level instead of warnings only.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the persisted session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Dashboard stats, recent activity and alert highlights (default).
    Dashboard {
        /// Number of recent activity items to show (0 = all).
        #[arg(long, default_value_t = 0)]
        activity: usize,
    },
    /// Tracked narratives.
    #[command(subcommand)]
    Narratives(NarrativeCommand),
    /// Accounts and networks spreading narratives.
    #[command(subcommand)]
    Actors(ActorCommand),
    /// Alerts raised by the monitoring pipeline.
    #[command(subcommand)]
    Alerts(AlertCommand),
    /// Propagation timeline, oldest first.
    Timeline {
        /// Inclusive lower bound (RFC 3339).
        #[arg(long)]
        start: Option<chrono::DateTime<chrono::Utc>>,
        /// Inclusive upper bound (RFC 3339).
        #[arg(long)]
        end: Option<chrono::DateTime<chrono::Utc>>,
        #[arg(long)]
        narrative: Option<String>,
        #[arg(long)]
        platform: Option<String>,
    },
    /// Analysis reports.
    #[command(subcommand)]
    Reports(ReportCommand),
    /// Multilingual lexicons; pass a language id to list its terms.
    Lexicon { language: Option<String> },
    /// Serve the active backend over HTTP at /api/v1.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<usize>,
}

#[derive(Subcommand)]
pub enum NarrativeCommand {
    List {
        #[arg(long)]
        category: Option<NarrativeCategory>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
        /// Also list related narratives.
        #[arg(long)]
        related: bool,
        /// Also print this narrative's timeline.
        #[arg(long)]
        timeline: bool,
    },
}

#[derive(Subcommand)]
pub enum ActorCommand {
    List {
        #[arg(long = "type")]
        actor_type: Option<ActorType>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        coordinated: Option<bool>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
        /// Also print the co-narrative network.
        #[arg(long)]
        network: bool,
        /// Also print recent activity.
        #[arg(long)]
        activity: bool,
    },
}

#[derive(Subcommand)]
pub enum AlertCommand {
    List {
        #[arg(long)]
        severity: Option<Severity>,
        #[arg(long = "type")]
        alert_type: Option<AlertType>,
        /// Only alerts not yet acknowledged.
        #[arg(long)]
        active: bool,
    },
    Show { id: String },
    /// Acknowledge an alert.
    Ack { id: String },
    /// Escalate an alert to CRITICAL.
    Escalate { id: String },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Show { id: String },
    /// Generate a new report.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long = "type", default_value = "narrative")]
        kind: ReportKind,
        #[arg(long, default_value = "week")]
        timeframe: String,
        #[arg(long = "narrative")]
        narratives: Vec<String>,
        #[arg(long = "actor")]
        actors: Vec<String>,
        #[arg(long)]
        no_charts: bool,
        #[arg(long)]
        raw_data: bool,
        #[arg(long)]
        no_recommendations: bool,
    },
    /// Request a download link for a report.
    Export {
        id: String,
        #[arg(long, default_value = "pdf")]
        format: ExportFormat,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(mode) = cli.mode {
        cfg.api.mode = mode;
    }
    if let Some(url) = &cli.api_url {
        cfg.api.base_url = url.clone();
    }
    if cli.fast {
        cfg.mock.latency_scale = 0.0;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    let level = if serving || cli.verbose {
        cfg.general.log_level.as_str()
    } else {
        "warn"
    };
    logging::init("dexter", level, LogFormat::parse(&cfg.general.log_format));

    let ctx = commands::Context::build(cfg, cli.json).await?;

    match cli.command {
        None => commands::dashboard::run(&ctx, 0).await?,
        Some(Commands::Dashboard { activity }) => commands::dashboard::run(&ctx, activity).await?,
        Some(Commands::Login { email, password }) => {
            commands::auth::login(&ctx, &email, &password).await?
        }
        Some(Commands::Logout) => commands::auth::logout(&ctx).await?,
        Some(Commands::Whoami) => commands::auth::whoami(&ctx).await?,
        Some(Commands::Narratives(cmd)) => commands::narratives::run(&ctx, cmd).await?,
        Some(Commands::Actors(cmd)) => commands::actors::run(&ctx, cmd).await?,
        Some(Commands::Alerts(cmd)) => commands::alerts::run(&ctx, cmd).await?,
        Some(Commands::Timeline {
            start,
            end,
            narrative,
            platform,
        }) => {
            let criteria = dx_core::query::TimelineFilter {
                start,
                end,
                narrative_id: narrative,
                platform,
            };
            commands::timeline::run(&ctx, &criteria).await?
        }
        Some(Commands::Reports(cmd)) => commands::reports::run(&ctx, cmd).await?,
        Some(Commands::Lexicon { language }) => {
            commands::lexicon::run(&ctx, language.as_deref()).await?
        }
        Some(Commands::Serve { host, port }) => commands::serve::run(&ctx, host, port).await?,
    }

    Ok(())
}
