use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use solar_estimator::build_app;
use solar_estimator::config::{Config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use solar_estimator::shared_state::AppState;
use solar_estimator::telemetry::{init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load {config_path}"))?;
    init_tracing(config.log_format);
    if !Path::new(&config_path).exists() {
        warn!(path = %config_path, "config file not found, using defaults");
    }
    info!(
        path = %config_path,
        psh_min = config.calculator.limits.peak_sun_hours_min,
        psh_max = config.calculator.limits.peak_sun_hours_max,
        "configuration loaded"
    );

    // 2. Build the application
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, config.server.port))?;
    let app = build_app(AppState::new(config));

    // 3. Serve until Ctrl+C / SIGTERM
    let handle = axum_server::Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.graceful_shutdown(Some(Duration::from_secs(5)));
    });

    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("HTTP server error")?;
    Ok(())
}
