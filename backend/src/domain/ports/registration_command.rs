//! Driving port for early-access registration.
//!
//! Inbound adapters call this port with untrusted input and receive either a
//! summary of the stored record or a domain [`Error`] whose code tells them
//! which failure class occurred.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationSubmission, RegistrationSummary};

/// Domain use-case port for registering interest in early access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate, de-duplicate and persist a submission.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::InvalidRequest`] with every violated
    ///   field rule attached.
    /// - [`crate::domain::ErrorCode::Conflict`] when the normalized email is
    ///   already registered.
    /// - [`crate::domain::ErrorCode::ServiceUnavailable`] or
    ///   [`crate::domain::ErrorCode::InternalError`] when the store fails.
    async fn register(
        &self,
        submission: RegistrationSubmission,
    ) -> Result<RegistrationSummary, Error>;
}
