//! Builders wiring the registration store into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use early_access::domain::RegistrationService;
use early_access::domain::ports::{RegistrationRepository, StoreHealth};
use early_access::inbound::http::state::HttpState;
use early_access::outbound::memory::InMemoryRegistrationRepository;
use early_access::outbound::persistence::DieselRegistrationRepository;

use super::ServerConfig;

fn state_for<R>(store: Arc<R>, expose_error_details: bool) -> HttpState
where
    R: RegistrationRepository + StoreHealth + 'static,
{
    let service = RegistrationService::new(store.clone(), Arc::new(DefaultClock));
    HttpState::new(Arc::new(service), store).with_error_details(expose_error_details)
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_for(
            Arc::new(DieselRegistrationRepository::new(pool.clone())),
            config.expose_error_details,
        ),
        None => {
            warn!("no database configured; registrations are kept in memory");
            state_for(
                Arc::new(InMemoryRegistrationRepository::new()),
                config.expose_error_details,
            )
        }
    };
    web::Data::new(state)
}
