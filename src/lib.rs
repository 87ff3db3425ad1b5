pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use services::UploadSweeper;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("config.toml already exists.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            config.validate_for_serve()?;
            let prometheus_handle = install_metrics_recorder(&config)?;
            serve(config, prometheus_handle).await
        }
        Commands::SeedAdmin { email, password } => {
            cli::cmd_seed_admin(&config, &email, &password).await
        }
        Commands::UpdateAdmin => cli::cmd_update_admin(&config).await,
        Commands::SweepUploads => cli::cmd_sweep_uploads(&config).await,
        Commands::Init => Ok(()),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn install_metrics_recorder(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn serve(config: Config, prometheus_handle: Option<PrometheusHandle>) -> anyhow::Result<()> {
    info!(
        "Sharjah Properties v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;
    let sweep_config = config
        .uploads
        .sweep_enabled
        .then(|| config.uploads.clone());

    let state = api::create_app_state_from_config(config, prometheus_handle).await?;

    // Kept alive for the lifetime of the server.
    let _scheduler = match sweep_config {
        Some(uploads) => {
            let sweeper = UploadSweeper::new(state.store().clone(), &uploads);
            match sweeper.schedule(uploads.sweep_interval_hours).await {
                Ok(sched) => Some(sched),
                Err(e) => {
                    warn!("Failed to schedule upload sweep: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    let app = api::router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
