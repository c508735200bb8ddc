use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use pla_tong_api::api::create_application;
use pla_tong_api::config::AppConfig;
use pla_tong_api::state::AppState;

/// Longest gap between idle session sweeps
const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// The main entry point for the PlaTong API server
///
/// Loads `.env`, installs tracing, builds the application state from the
/// environment and serves until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("Starting PlaTong API server");

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let state = AppState::from_config(&config).map_err(|e| {
        error!("Failed to initialise application state: {}", e);
        e
    })?;
    info!(
        steps = state.content.steps.len(),
        session_limit = config.session_limit,
        environment = %config.environment,
        "Site content loaded"
    );

    // Reclaim sessions whose visitors left without closing them
    let sweep_period = config.session_idle_timeout.min(SESSION_SWEEP_PERIOD);
    let session_sweep = state.sessions.start_cleanup_task(sweep_period);

    // Create the Axum application with all routes and middleware
    let app = create_application(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    session_sweep.abort();

    info!(open_sessions = state.sessions.len(), "Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
