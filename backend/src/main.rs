//! Service entry-point: loads settings, prepares the registration store and
//! serves the HTTP API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use early_access::inbound::http::health::HealthState;
use early_access::outbound::persistence::{DbPool, run_pending_migrations};
use early_access::settings::AppSettings;

use server::{ServerConfig, create_server, drain_on_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;

    let rate_limit = settings.rate_limit().map_err(std::io::Error::other)?;
    let (host, port) = settings.bind_addr();
    let mut config = ServerConfig::new(host, port, rate_limit)
        .with_error_details(settings.expose_error_details);
    if settings.expose_error_details {
        warn!("error details are exposed in responses; do not use in production");
    }

    if let Some(pool_config) = settings.pool_config() {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        info!("connected to registration database");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_signal(server.handle(), health_state));
    server.await
}
