//! Receipt Processor - scores purchase receipts and serves the results
//!
//! Runs the public receipts API and the admin API side by side.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use receipt_processor::api::{create_admin_router, create_router};
use receipt_processor::config::AppEnvironment;
use receipt_processor::{AppState, Config};

/// Main entry point for the receipt processor.
///
/// # Startup Sequence
/// 1. Load `.env` and initialize the tracing subscriber
/// 2. Load configuration from environment variables
/// 3. Create the score cache and scoring engine
/// 4. Serve the public and admin routers
/// 5. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_tracing(AppEnvironment::current());
    if let Err(err) = dotenv {
        tracing::debug!("no .env file loaded: {}", err);
    }

    info!("Starting receipt processor");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: env={:?}, app_port={}, admin_port={}, cache_cap={}",
        config.environment, config.app_port, config.admin_port, config.cache_capacity
    );

    let state = AppState::from_config(&config);

    let public = serve(create_router(state.clone()), config.app_port, "public");
    let admin = serve(create_admin_router(state), config.admin_port, "admin");
    tokio::try_join!(public, admin)?;

    info!("Server shutdown complete");
    Ok(())
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default filter; production logs are JSON.
fn init_tracing(environment: AppEnvironment) {
    let default_filter = if environment.is_production() {
        "receipt_processor=info,tower_http=info"
    } else {
        "receipt_processor=debug,tower_http=debug"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if environment.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(app: Router, port: u16, name: &'static str) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {name} listener on {addr}"))?;
    info!("{} server listening on http://{}", name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(name))
        .await
        .with_context(|| format!("{name} server failed"))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal(name: &'static str) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("{}: received Ctrl+C, initiating shutdown...", name);
        }
        _ = terminate => {
            info!("{}: received SIGTERM, initiating shutdown...", name);
        }
    }
}
