//! Serve command - runs the HTTP gateway

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::config::{AppConfig, GatewayConfig, ProcessEnv};
use crate::infrastructure::logging;

/// Run the server until ctrl-c
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config();
    logging::init_logging(&config.logging);

    let gateway = crate::create_gateway(&GatewayConfig::from_env(&ProcessEnv))?;
    let state = AppState::new(gateway);
    let shutdown = state.shutdown.clone();
    let app = create_router(state, &config.cors);

    let addr = build_socket_addr(&config)?;
    info!(
        origins = ?config.cors.allowed_origins,
        "Starting server on {}", addr
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

pub(crate) fn load_config() -> AppConfig {
    match AppConfig::load_with_env(&ProcessEnv) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet
            eprintln!("Invalid configuration, using defaults: {}", e);
            let mut config = AppConfig::default();
            config.cors.apply_env(&ProcessEnv);
            config
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

/// Resolve on ctrl-c, cancelling in-flight chat jobs
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }

    info!("Shutdown requested, cancelling in-flight chat jobs");
    shutdown.cancel();
}
