//! Early-access registration service.
//!
//! Implements [`RegistrationCommand`] on top of a [`RegistrationRepository`].
//! The pre-insert lookup exists to answer the common duplicate case without a
//! failed write; the store's unique constraint remains the authority when two
//! submissions race past the lookup.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    RegistrationCommand, RegistrationRepository, RegistrationRepositoryError,
};
use crate::domain::{
    Error, RegistrationId, RegistrationRecord, RegistrationSubmission, RegistrationSummary,
    ValidRegistration,
};

/// Message attached to the conflict raised for an already registered email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email address is already registered";

/// Registration service implementing the driving port.
#[derive(Clone)]
pub struct RegistrationService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RegistrationService<R> {
    /// Create a service over `repository`, stamping records with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> RegistrationService<R>
where
    R: RegistrationRepository,
{
    fn map_repository_error(error: RegistrationRepositoryError) -> Error {
        match error {
            RegistrationRepositoryError::Connection { message } => Error::service_unavailable(
                format!("registration store unavailable: {message}"),
            ),
            RegistrationRepositoryError::Query { message } => {
                Error::internal(format!("registration store error: {message}"))
            }
            RegistrationRepositoryError::DuplicateEmail { .. } => duplicate_email(),
        }
    }
}

fn duplicate_email() -> Error {
    Error::conflict(DUPLICATE_EMAIL_MESSAGE)
}

#[async_trait]
impl<R> RegistrationCommand for RegistrationService<R>
where
    R: RegistrationRepository,
{
    async fn register(
        &self,
        submission: RegistrationSubmission,
    ) -> Result<RegistrationSummary, Error> {
        let valid = ValidRegistration::try_from(submission).map_err(|violations| {
            let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
            debug!(?fields, "registration rejected by validation");
            Error::validation(violations)
        })?;

        let existing = self
            .repository
            .find_by_email(valid.email())
            .await
            .map_err(|err| {
                error!(error = %err, "registration lookup failed");
                Self::map_repository_error(err)
            })?;
        if existing.is_some() {
            info!(user_type = %valid.applicant().user_type(), "duplicate registration rejected");
            return Err(duplicate_email());
        }

        let record = RegistrationRecord::create(valid, RegistrationId::random(), self.clock.utc());
        let stored = self.repository.insert(&record).await.map_err(|err| {
            if matches!(err, RegistrationRepositoryError::DuplicateEmail { .. }) {
                info!("concurrent duplicate registration rejected by store");
            } else {
                error!(error = %err, "registration insert failed");
            }
            Self::map_repository_error(err)
        })?;

        info!(
            registration_id = %stored.id,
            user_type = %stored.user_type(),
            "early access registration stored"
        );
        Ok(RegistrationSummary::from(&stored))
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
