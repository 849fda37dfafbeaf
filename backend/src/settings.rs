//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `EARLY_ACCESS_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
use crate::middleware::{RateLimit, RateLimitError};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Settings for the HTTP listener and the registration store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EARLY_ACCESS")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one, registrations are kept in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connect_timeout_secs: Option<u64>,
    /// Requests each client IP may make per rate-limit window.
    pub rate_limit_max_requests: Option<u32>,
    /// Length of the rate-limit window in seconds.
    pub rate_limit_window_secs: Option<u64>,
    /// Include failure causes in 500 responses. Keep disabled in production.
    #[ortho_config(default = false)]
    pub expose_error_details: bool,
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address tuple accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host(), self.port())
    }

    /// Pool configuration, present only when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_connection_timeout(Duration::from_secs(
                    self.connect_timeout_secs
                        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                )),
        )
    }

    /// Per-client request quota, 100 requests per 15 minutes unless set.
    pub fn rate_limit(&self) -> Result<RateLimit, RateLimitError> {
        RateLimit::new(
            self.rate_limit_max_requests.unwrap_or(DEFAULT_MAX_REQUESTS),
            self.rate_limit_window_secs
                .map_or(DEFAULT_WINDOW, Duration::from_secs),
        )
    }
}
