//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel.
//!
//! The unique index on `early_access_users.email` is the authority for
//! duplicate detection; a violation on insert is reported as
//! [`RegistrationRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    RegistrationRepository, RegistrationRepositoryError, StoreHealth, StoreHealthError,
};
use crate::domain::{EmailAddress, RegistrationRecord};

use super::models::{NewRegistrationRow, RegistrationRow};
use super::pool::{DbPool, PoolError};
use super::schema::early_access_users;

/// Diesel-backed registration store.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RegistrationRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RegistrationRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RegistrationRepositoryError::duplicate_email("email already registered")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RegistrationRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => {
            RegistrationRepositoryError::query(format!("database error: {}", info.message()))
        }
        other => RegistrationRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<RegistrationRecord>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RegistrationRow> = early_access_users::table
            .filter(early_access_users::email.eq(email.as_str()))
            .select(RegistrationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(RegistrationRecord::try_from).transpose()
    }

    async fn insert(
        &self,
        record: &RegistrationRecord,
    ) -> Result<RegistrationRecord, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: RegistrationRow = diesel::insert_into(early_access_users::table)
            .values(NewRegistrationRow::from(record))
            .returning(RegistrationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        RegistrationRecord::try_from(row)
    }
}

#[async_trait]
impl StoreHealth for DieselRegistrationRepository {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| StoreHealthError::unreachable(err.to_string()))?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| StoreHealthError::unreachable(err.to_string()))
    }
}
