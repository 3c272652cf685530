// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use sofa_mock_gateway::{
    api::router,
    config::{GatewayConfig, DEFAULT_LOG_FILTER},
    logging::{init_logging, LogFormat},
    state::AppState,
    store::InMemoryStore,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging(DEFAULT_LOG_FILTER, LogFormat::Pretty);
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(DEFAULT_LOG_FILTER, config.log_format);

    let state = match AppState::new(InMemoryStore::new(), &config) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build partner HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let app = router(state);

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        addr = %config.bind_addr,
        partner = %config.api_server_url,
        timeout_secs = config.partner_timeout.as_secs(),
        "SOFA mock gateway listening (docs at /docs)"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    info!("Shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
