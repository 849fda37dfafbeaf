//! Domain model and use cases for early-access registration.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure taxonomy.
//! - [`RegistrationSubmission`] and [`ValidRegistration`]: untrusted input and
//!   its validated form.
//! - [`RegistrationService`]: the registration use case behind
//!   [`ports::RegistrationCommand`].
//! - [`TraceId`]: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, FieldViolation};
pub use self::registration::{
    Applicant, COUNTRY_MAX, EMAIL_MAX, EmailAddress, EmailValidationError, FULL_NAME_MAX,
    FULL_NAME_MIN, Field, IDEA_CATEGORY_MAX, MESSAGE_MAX, MissingIdeaCategory,
    ParseUserTypeError, RegistrationId, RegistrationRecord, RegistrationSubmission,
    RegistrationSummary, SubmittedValue, UserType, ValidRegistration,
};
pub use self::registration_service::{DUPLICATE_EMAIL_MESSAGE, RegistrationService};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
