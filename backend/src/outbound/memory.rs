//! In-process registration store.
//!
//! Used when no database URL is configured and by the integration tests.
//! Records live only as long as the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    RegistrationRepository, RegistrationRepositoryError, StoreHealth, StoreHealthError,
};
use crate::domain::{EmailAddress, RegistrationRecord};

/// Mutex-guarded map keyed by normalized email.
///
/// The duplicate check and the insert happen under one lock acquisition, so
/// concurrent inserts of the same email admit exactly one.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationRepository {
    records: Mutex<HashMap<EmailAddress, RegistrationRecord>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    ///
    /// Counts through a poisoned lock: every write is a single map insert,
    /// so the map is never left half-updated.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<EmailAddress, RegistrationRecord>>, RegistrationRepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| RegistrationRepositoryError::query("registration store lock poisoned"))
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<RegistrationRecord>, RegistrationRepositoryError> {
        Ok(self.lock()?.get(email).cloned())
    }

    async fn insert(
        &self,
        record: &RegistrationRecord,
    ) -> Result<RegistrationRecord, RegistrationRepositoryError> {
        let mut records = self.lock()?;
        if records.contains_key(&record.email) {
            return Err(RegistrationRepositoryError::duplicate_email(
                "email already registered",
            ));
        }
        records.insert(record.email.clone(), record.clone());
        Ok(record.clone())
    }
}

#[async_trait]
impl StoreHealth for InMemoryRegistrationRepository {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        self.lock()
            .map(|_| ())
            .map_err(|err| StoreHealthError::unreachable(err.to_string()))
    }
}
