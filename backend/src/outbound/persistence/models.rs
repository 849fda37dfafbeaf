//! Row types mapping between Diesel and the registration domain model.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RegistrationRepositoryError;
use crate::domain::{Applicant, EmailAddress, RegistrationId, RegistrationRecord, UserType};

use super::schema::early_access_users;

/// Row read from `early_access_users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = early_access_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrationRow {
    pub id: Uuid,
    pub full_name: String,
    pub country: String,
    pub email: String,
    pub user_type: String,
    pub idea_category: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable form of a new registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = early_access_users)]
pub(crate) struct NewRegistrationRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub country: &'a str,
    pub email: &'a str,
    pub user_type: &'a str,
    pub idea_category: Option<&'a str>,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a RegistrationRecord> for NewRegistrationRow<'a> {
    fn from(record: &'a RegistrationRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            full_name: &record.full_name,
            country: &record.country,
            email: record.email.as_str(),
            user_type: record.user_type().as_str(),
            idea_category: record.applicant.idea_category(),
            message: &record.message,
            created_at: record.created_at,
        }
    }
}

impl TryFrom<RegistrationRow> for RegistrationRecord {
    type Error = RegistrationRepositoryError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::parse(&row.email).map_err(|err| {
            RegistrationRepositoryError::query(format!("invalid stored email: {err}"))
        })?;
        let user_type = UserType::from_str(&row.user_type).map_err(|err| {
            RegistrationRepositoryError::query(format!("invalid stored user type: {err}"))
        })?;
        let applicant = Applicant::from_parts(user_type, row.idea_category).map_err(|err| {
            RegistrationRepositoryError::query(format!("invalid stored applicant: {err}"))
        })?;

        Ok(Self {
            id: RegistrationId::from_uuid(row.id),
            full_name: row.full_name,
            country: row.country,
            email,
            applicant,
            message: row.message,
            created_at: row.created_at,
        })
    }
}
