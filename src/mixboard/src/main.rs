//! Mixboard — marketing-mix-modeling analytics backend.
//!
//! Main entry point: loads configuration, generates the weekly dataset, and
//! starts the REST server.

use chrono::{Datelike, Duration, Utc};
use clap::Parser;
use mixboard_api::ApiServer;
use mixboard_core::config::AppConfig;
use mixboard_datagen::{generate, GeneratorConfig};
use mixboard_insights::HttpInsightsClient;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "mixboard")]
#[command(about = "Marketing mix modeling analytics backend")]
#[command(version)]
struct Cli {
    /// HTTP port (overrides config)
    #[arg(long, env = "MIXBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Number of weeks to generate (overrides config)
    #[arg(long, env = "MIXBOARD__DATASET__WEEKS")]
    weeks: Option<u32>,

    /// Dataset RNG seed (overrides config)
    #[arg(long, env = "MIXBOARD__DATASET__SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixboard=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Mixboard starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(weeks) = cli.weeks {
        config.dataset.weeks = weeks;
    }
    if let Some(seed) = cli.seed {
        config.dataset.seed = seed;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        weeks = config.dataset.weeks,
        seed = config.dataset.seed,
        "Configuration loaded"
    );

    // Anchor the series on the Monday of the current week.
    let today = Utc::now().date_naive();
    let anchor = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let records = Arc::new(generate(&GeneratorConfig::new(
        config.dataset.weeks,
        config.dataset.seed,
        anchor,
    )));

    let insights = Arc::new(HttpInsightsClient::new(&config.insights)?);

    let api_server = ApiServer::new(config, records, insights);

    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Mixboard is ready to serve traffic");

    api_server.start_http().await?;

    Ok(())
}
