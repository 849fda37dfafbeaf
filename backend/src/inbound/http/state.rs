//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RegistrationCommand, StoreHealth};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use case.
    pub registration: Arc<dyn RegistrationCommand>,
    /// Store connectivity probe for `/health`.
    pub store_health: Arc<dyn StoreHealth>,
    /// Reveal server-side failure causes in 500 responses.
    pub expose_error_details: bool,
}

impl HttpState {
    /// Construct state with error details hidden.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use early_access::domain::RegistrationService;
    /// use early_access::inbound::http::state::HttpState;
    /// use early_access::outbound::memory::InMemoryRegistrationRepository;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryRegistrationRepository::new());
    /// let service = RegistrationService::new(store.clone(), Arc::new(DefaultClock));
    /// let state = HttpState::new(Arc::new(service), store);
    /// assert!(!state.expose_error_details);
    /// ```
    pub fn new(
        registration: Arc<dyn RegistrationCommand>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            registration,
            store_health,
            expose_error_details: false,
        }
    }

    /// Toggle whether 500 responses carry the underlying cause.
    #[must_use]
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}
