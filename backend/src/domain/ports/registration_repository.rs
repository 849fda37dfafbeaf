//! Driven port for the registration record store.
//!
//! The store owns the authoritative uniqueness guarantee: adapters must
//! enforce a unique constraint on the normalized email and report a violation
//! as [`RegistrationRepositoryError::DuplicateEmail`] rather than a generic
//! query failure.

use async_trait::async_trait;

use crate::domain::{EmailAddress, RegistrationRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registration store adapters.
    pub enum RegistrationRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "registration store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "registration store query failed: {message}",
        /// The unique email constraint rejected an insert.
        DuplicateEmail { message: String } => "duplicate registration email: {message}",
    }
}

/// Keyed lookup and constrained insert over registration records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Fetch the record registered under a normalized email, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<RegistrationRecord>, RegistrationRepositoryError>;

    /// Persist a new record and return it as stored.
    ///
    /// Fails with [`RegistrationRepositoryError::DuplicateEmail`] when a record
    /// with the same email already exists, including one inserted
    /// concurrently after a caller's lookup.
    async fn insert(
        &self,
        record: &RegistrationRecord,
    ) -> Result<RegistrationRecord, RegistrationRepositoryError>;
}
