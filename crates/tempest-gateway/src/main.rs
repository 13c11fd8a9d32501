//! Tempest gateway
//!
//! - Polls the station API on a fixed interval into an in-memory ring
//! - Serves latest / history / map-session lookups under the base path
//! - Ops endpoints: /healthz, /readyz, /metrics
//! - Graceful shutdown: stop accepting, then stop the poller

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tempest_core::error::{Result, TempestError};
use tempest_gateway::{app_state::AppState, config, router, upstream::UpstreamClient};

const DEFAULT_CONFIG_PATH: &str = "tempest.yaml";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.client_code().as_str(), "tempest-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr();

    let source = UpstreamClient::from_config(&cfg)?;
    tracing::info!(
        station = %cfg.station.station_id,
        url = %source.log_url(),
        "upstream configured"
    );

    let state = AppState::new(cfg);
    let app = router::build_router(state.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let poller = tokio::spawn(state.poller(Arc::new(source)).run(shutdown_rx));

    tracing::info!(%listen, "tempest-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen.as_str())
        .await
        .map_err(|e| TempestError::Internal(format!("bind {listen} failed: {e}")))?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await;

    state.set_draining();
    let _ = shutdown_tx.send(());
    if let Err(e) = poller.await {
        tracing::warn!(error = %e, "poller task ended abnormally");
    }

    served.map_err(|e| TempestError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    state.set_draining();
    tracing::info!("signal received, starting graceful shutdown");
}
