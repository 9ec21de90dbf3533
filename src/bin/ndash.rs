use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use ndash::{AppState, SharedState, build_app, config::AppConfig, powerdns::client::PowerDnsClient};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Listen address for the HTTP server
    #[arg(long, env = "LISTEN", value_name = "ADDR", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,
    /// PowerDNS API URL (e.g. http://127.0.0.1:8081/api/v1)
    #[arg(long, env = "PDNS_API_URL", value_name = "URL")]
    pdns_url: String,
    /// PowerDNS API key
    #[arg(long, env = "PDNS_API_KEY", value_name = "KEY", hide_env_values = true)]
    pdns_key: String,
    /// Timeout for a single PowerDNS API call, in seconds
    #[arg(long, env = "PDNS_TIMEOUT_SECS", value_name = "SECS", default_value_t = 30)]
    pdns_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::new(
        &cli.pdns_url,
        cli.pdns_key.clone(),
        Duration::from_secs(cli.pdns_timeout_secs),
    )
    .context("invalid configuration")?;
    let state = init_shared_state(&config)?;

    let app = build_app(state);

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind to {}", cli.listen))?;

    info!("NDash PowerDNS dashboard listening on http://{}", listener.local_addr()?);
    info!("PowerDNS API: {}", config.pdns_url);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    Ok(())
}

fn init_shared_state(config: &AppConfig) -> Result<SharedState> {
    let pdns = PowerDnsClient::new(&config.pdns_url, &config.pdns_api_key, config.pdns_timeout)
        .context("failed to build PowerDNS HTTP client")?;

    Ok(Arc::new(AppState::new(Arc::new(pdns))))
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
