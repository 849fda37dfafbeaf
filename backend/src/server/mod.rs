//! Server construction and shutdown handling.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServerHandle};
use actix_web::{HttpServer, web};
use tracing::{info, warn};

use early_access::inbound::http::app::{AppDependencies, build_app};
use early_access::inbound::http::health::HealthState;

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Actix's own signal handling is disabled; [`drain_on_signal`] stops the
/// server so probes can report the drain first.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        rate_limit,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            rate_limit: rate_limit.clone(),
        })
    })
    .disable_signals()
    .bind((bind_addr.0.as_str(), bind_addr.1))?
    .run();

    info!(host = %bind_addr.0, port = bind_addr.1, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; listening for Ctrl-C only");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Wait for SIGINT or SIGTERM, mark the process unhealthy and stop the
/// server gracefully.
pub async fn drain_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    shutdown_signal().await;
    info!("shutdown signal received; draining");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
