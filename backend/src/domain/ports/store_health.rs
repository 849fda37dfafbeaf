//! Driven port for probing registration store connectivity.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Reasons a connectivity probe failed.
    pub enum StoreHealthError {
        /// The store could not be reached.
        Unreachable { message: String } => "registration store unreachable: {message}",
    }
}

/// Cheap round-trip used by health reporting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Succeeds when the store answers a trivial request.
    async fn ping(&self) -> Result<(), StoreHealthError>;
}
