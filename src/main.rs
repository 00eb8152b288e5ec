use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use capdash::{run_dashboard, DashboardConfig};

/// Capacity-planning dashboard for the predictive-capacity API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the API; overrides the configuration file.
    #[arg(long, env = "CAPDASH_API_URL")]
    api_url: Option<String>,

    /// Organization whose metrics are listed; overrides the configuration file.
    #[arg(long, env = "CAPDASH_ORGANIZATION")]
    organization: Option<String>,

    /// Log filter, e.g. `capdash=debug`. Falls back to `RUST_LOG`, then `capdash=info`.
    #[arg(long)]
    log: Option<String>,
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("capdash=info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    let mut cfg = match &args.config {
        Some(path) => DashboardConfig::from_yaml_file(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to load configuration");
            eframe::Error::AppCreation(Box::new(e))
        })?,
        None => DashboardConfig::default(),
    };
    if let Some(url) = args.api_url {
        cfg.api_url = url;
    }
    if let Some(org) = args.organization {
        cfg.organization = org;
    }

    tracing::info!(api = %cfg.api_url, organization = %cfg.organization, "starting dashboard");
    run_dashboard(cfg)
}
