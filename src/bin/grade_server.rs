use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use blaze_grade::cache::FreshnessCache;
use blaze_grade::config::{AppConfig, CONFIG_PATH};
use blaze_grade::feed::{BlazeFeed, FeedAggregator};
use blaze_grade::server::{self, AppState};

#[derive(Parser)]
#[command(name = "grade-server", about = "Blaze roulette grade analytics server")]
struct Args {
    /// Config file path (defaults apply when the file is absent)
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = AppConfig::load_or_default(&args.config)?;
    if args.config.exists() {
        info!("Loaded config from {}", args.config.display());
    } else {
        info!("No config at {}, using defaults", args.config.display());
    }

    let tz = config.timezone()?;
    let ttl = Duration::from_secs(config.cache.ttl_secs);
    let bind_addr = args.bind.unwrap_or_else(|| config.server.bind_addr.clone());

    info!(
        "Starting grade-server — tz={tz} ttl={}s window={} max_records={}",
        config.cache.ttl_secs, config.analysis.pattern_window, config.feed.max_records,
    );

    let feed = BlazeFeed::new(&config.feed)?;
    let aggregator = FeedAggregator::new(
        feed,
        tz,
        config.analysis.pattern_window,
        config.feed.max_records,
    );
    let cache = Arc::new(FreshnessCache::new(aggregator, ttl));

    let app = server::router(AppState { cache, tz });
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Serving grade data on http://{bind_addr}/api/grade-dados");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
