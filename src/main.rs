use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use kripto_rs::config::Settings;
use kripto_rs::market_data::adapters::coingecko::CoinGeckoAdapter;
use kripto_rs::market_data::SnapshotCache;
use kripto_rs::telemetry;
use kripto_rs::web::{self, AppState};

#[derive(Debug, Parser)]
#[command(name = "kripto-rs", about = "Realtime crypto market dashboard (CoinGecko)")]
struct Cli {
    /// TOML settings file, layered over the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides server.bind
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(bind) = cli.bind {
        settings.server.bind = bind;
    }

    telemetry::init_tracing(&settings.log.filter);
    telemetry::init_metrics(settings.metrics.port)?;

    let adapter = CoinGeckoAdapter::new(&settings.upstream.base_url, settings.upstream.timeout())
        .context("building HTTP client")?;
    tracing::info!(url = adapter.markets_url(), ttl_secs = settings.cache.ttl_secs, "upstream configured");

    let cache = SnapshotCache::new(Arc::new(adapter), settings.cache.ttl());
    let app = web::router(AppState::new(cache, settings.report.top_n));

    let addr: SocketAddr = settings
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", settings.server.bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("dashboard listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping");
}
