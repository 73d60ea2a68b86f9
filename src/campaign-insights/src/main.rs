//! Campaign Insights: campaign performance dashboard data.
//!
//! Loads the campaign list once, builds every dashboard view and prints the
//! result as JSON on stdout.

use campaign_core::config::AppConfig;
use campaign_ingest::{load_or_empty, CampaignSource, FileCampaignSource, HttpCampaignSource};
use campaign_reporting::{CampaignDashboard, DashboardSnapshot};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-insights")]
#[command(about = "Aggregate campaign performance into dashboard views")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(long, env = "CAMPAIGN_INSIGHTS_CONFIG")]
    config: Option<PathBuf>,

    /// Campaign data endpoint (overrides config)
    #[arg(long, env = "CAMPAIGN_INSIGHTS__DATA_SOURCE__URL")]
    url: Option<String>,

    /// Read campaigns from a local JSON file instead of the endpoint
    #[arg(long, env = "CAMPAIGN_INSIGHTS__DATA_SOURCE__INPUT_PATH")]
    input: Option<PathBuf>,

    /// Which view to print
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Print compact JSON
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    All,
    Summary,
    Weekly,
    Demographic,
    Device,
    Regional,
}

fn select_view(snapshot: &DashboardSnapshot, view: View) -> serde_json::Result<serde_json::Value> {
    match view {
        View::All => serde_json::to_value(snapshot),
        View::Summary => serde_json::to_value((&snapshot.summary, &snapshot.campaigns)),
        View::Weekly => serde_json::to_value(&snapshot.weekly),
        View::Demographic => serde_json::to_value(&snapshot.demographics),
        View::Device => serde_json::to_value(&snapshot.devices),
        View::Regional => serde_json::to_value(&snapshot.regions),
    }
}

fn init_tracing(filter: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_error;
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => {
            config_error = None;
            config
        }
        Err(e) => {
            config_error = Some(e);
            AppConfig::default()
        }
    };

    init_tracing(&config.logging.filter, cli.json_logs || config.logging.json);
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Apply CLI overrides
    if let Some(url) = cli.url {
        config.data_source.url = url;
    }
    if let Some(input) = cli.input {
        config.data_source.input_path = Some(input.display().to_string());
    }
    if cli.compact {
        config.output.pretty = false;
    }

    let source: Box<dyn CampaignSource> = match &config.data_source.input_path {
        Some(path) => Box::new(FileCampaignSource::new(path)),
        None => Box::new(HttpCampaignSource::from_config(&config.data_source)),
    };

    info!(source = %source.describe(), view = ?cli.view, "Campaign Insights starting");

    let outcome = load_or_empty(source.as_ref()).await;
    let mut dashboard = CampaignDashboard::new();
    let snapshot = dashboard.load(outcome.campaigns, outcome.error);

    let value = select_view(snapshot, cli.view)?;
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", rendered);

    if let Some(error) = &snapshot.load_error {
        warn!(error = %error, "Views were computed without campaign data");
    }

    Ok(())
}
