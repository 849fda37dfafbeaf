//! HTTP server configuration object.

use early_access::middleware::RateLimit;
use early_access::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) expose_error_details: bool,
    pub(crate) rate_limit: RateLimit,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, rate_limit: RateLimit) -> Self {
        Self {
            bind_addr: (host.into(), port),
            db_pool: None,
            expose_error_details: false,
            rate_limit,
        }
    }

    /// Attach a database pool; without one registrations stay in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}
