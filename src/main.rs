use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rulewarden::config::AppConfig;
use rulewarden::outcome;
use rulewarden::reconcile::Reconciler;
use rulewarden::report::TracingReporter;
use rulewarden::tracker::github::GitHubTracker;

#[derive(Parser)]
#[command(
    name = "rulewarden",
    about = "Reconciles rule-check results against GitHub issues"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Tracking label scoping which issues this run owns
    #[arg(short, long)]
    label: Option<String>,

    /// JSON-lines outcome records; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Compute every decision but skip all mutating tracker calls
    #[arg(long)]
    dry_run: bool,

    /// Days since last update before an open issue gets a reminder
    #[arg(long)]
    remind: Option<f64>,

    /// Apply per-record severity values as issue labels
    #[arg(long)]
    severity: bool,

    /// Tracker API token (overrides config and environment)
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.label.is_some() {
        config.reconcile.label = cli.label;
    }
    if let Some(remind) = cli.remind {
        config.reconcile.remind_after_days = remind;
    }
    if cli.dry_run {
        config.reconcile.dry_run = true;
    }
    if cli.severity {
        config.reconcile.apply_severity = true;
    }
    if cli.token.is_some() {
        config.tracker.token = cli.token;
    }

    let label = config.tracking_label()?.to_string();

    let records = match &cli.input {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            outcome::read_records(std::io::BufReader::new(file))?
        }
        None => outcome::read_records(std::io::stdin().lock())?,
    };

    tracing::info!(
        records = records.len(),
        label = %label,
        dry_run = config.reconcile.dry_run,
        "Starting reconciliation run"
    );

    let client = Arc::new(GitHubTracker::new(&config.tracker)?);
    let reporter = Arc::new(TracingReporter);
    let engine = Reconciler::new(client, reporter, label, &config.reconcile);

    let report = engine.run(records).await;

    if !report.is_clean() {
        for failure in &report.failures {
            tracing::error!(repo = %failure.repository, error = %failure.error, "Repository failed");
        }
        anyhow::bail!("{} repositories failed", report.failures.len());
    }

    Ok(())
}
