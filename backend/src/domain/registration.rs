//! Early-access registration model.
//!
//! A [`RegistrationSubmission`] carries untrusted input exactly as received.
//! [`ValidRegistration::try_from`] checks every field rule, collecting all
//! violations, and yields a value whose shape makes the conditional idea
//! category requirement unrepresentable when broken: only the
//! [`Applicant::IdeaOwner`] variant carries a category.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::ValidateEmail;

use super::FieldViolation;

/// Minimum length of a full name, in characters.
pub const FULL_NAME_MIN: usize = 2;
/// Maximum length of a full name, in characters.
pub const FULL_NAME_MAX: usize = 100;
/// Maximum length of a country name, in characters.
pub const COUNTRY_MAX: usize = 100;
/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 254;
/// Maximum length of an idea category, in characters.
pub const IDEA_CATEGORY_MAX: usize = 100;
/// Maximum length of the free-form message, in characters.
pub const MESSAGE_MAX: usize = 500;

/// A raw field value as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmittedValue {
    /// The field was missing or null.
    #[default]
    Absent,
    /// The field carried text (scalars are coerced to text by adapters).
    Text(String),
    /// The field carried a structured value that cannot be read as text.
    NotText,
}

impl SubmittedValue {
    /// Convenience constructor for textual input.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<Option<String>> for SubmittedValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}

/// Untrusted registration input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSubmission {
    /// Applicant's full name.
    pub full_name: SubmittedValue,
    /// Applicant's country.
    pub country: SubmittedValue,
    /// Contact email; becomes the uniqueness key once normalized.
    pub email: SubmittedValue,
    /// One of `investor`, `idea_owner` or `general`.
    pub user_type: SubmittedValue,
    /// Category of the applicant's idea; only read for idea owners.
    pub idea_category: SubmittedValue,
    /// Optional free-form note.
    pub message: SubmittedValue,
}

/// Submission fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `fullName`
    FullName,
    /// `country`
    Country,
    /// `email`
    Email,
    /// `userType`
    UserType,
    /// `ideaCategory`
    IdeaCategory,
    /// `message`
    Message,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Country => "country",
            Self::Email => "email",
            Self::UserType => "userType",
            Self::IdeaCategory => "ideaCategory",
            Self::Message => "message",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Country => "Country",
            Self::Email => "Email",
            Self::UserType => "User type",
            Self::IdeaCategory => "Idea category",
            Self::Message => "Message",
        }
    }

    fn required_message(self) -> String {
        match self {
            Self::IdeaCategory => "Idea category is required for idea owners".to_owned(),
            other => format!("{} is required", other.label()),
        }
    }
}

/// Kind of early-access applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    /// Interested in funding ideas.
    Investor,
    /// Brings an idea to the marketplace.
    IdeaOwner,
    /// Anyone else.
    General,
}

impl UserType {
    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::IdeaOwner => "idea_owner",
            Self::General => "general",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a [`UserType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type: {0}")]
pub struct ParseUserTypeError(String);

impl FromStr for UserType {
    type Err = ParseUserTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "investor" => Ok(Self::Investor),
            "idea_owner" => Ok(Self::IdeaOwner),
            "general" => Ok(Self::General),
            other => Err(ParseUserTypeError(other.to_owned())),
        }
    }
}

/// Applicant kind together with the data that only some kinds carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicant {
    /// See [`UserType::Investor`].
    Investor,
    /// See [`UserType::IdeaOwner`]; the category is non-empty.
    IdeaOwner {
        /// Category of the submitted idea.
        idea_category: String,
    },
    /// See [`UserType::General`].
    General,
}

/// Error returned when stored parts do not form a valid [`Applicant`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("idea owners must carry a non-empty idea category")]
pub struct MissingIdeaCategory;

impl Applicant {
    /// Rebuild an applicant from its flattened storage form.
    ///
    /// A category stored alongside a non-idea-owner type is dropped.
    pub fn from_parts(
        user_type: UserType,
        idea_category: Option<String>,
    ) -> Result<Self, MissingIdeaCategory> {
        match user_type {
            UserType::Investor => Ok(Self::Investor),
            UserType::General => Ok(Self::General),
            UserType::IdeaOwner => match idea_category {
                Some(idea_category) if !idea_category.trim().is_empty() => {
                    Ok(Self::IdeaOwner { idea_category })
                }
                _ => Err(MissingIdeaCategory),
            },
        }
    }

    /// The applicant's [`UserType`].
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Investor => UserType::Investor,
            Self::IdeaOwner { .. } => UserType::IdeaOwner,
            Self::General => UserType::General,
        }
    }

    /// Idea category, present only for idea owners.
    pub fn idea_category(&self) -> Option<&str> {
        match self {
            Self::IdeaOwner { idea_category } => Some(idea_category.as_str()),
            Self::Investor | Self::General => None,
        }
    }
}

/// Reasons an email address is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Nothing but whitespace was supplied.
    #[error("Email is required")]
    Empty,
    /// The trimmed address is longer than [`EMAIL_MAX`].
    #[error("Email cannot exceed {max} characters")]
    TooLong {
        /// The enforced maximum.
        max: usize,
    },
    /// The address is not syntactically valid.
    #[error("Please provide a valid email")]
    InvalidFormat,
}

/// Normalized (trimmed, lower-cased) email address.
///
/// Two submissions name the same applicant exactly when their normalized
/// addresses are equal.
///
/// # Examples
/// ```
/// use early_access::domain::EmailAddress;
///
/// let email = EmailAddress::parse(" Foo@Bar.com ").expect("valid email");
/// assert_eq!(email.as_str(), "foo@bar.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, validate and lower-case `raw`.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        let normalized = trimmed.to_lowercase();
        if !normalized.validate_email() || !has_top_level_domain(&normalized) {
            return Err(EmailValidationError::InvalidFormat);
        }
        Ok(Self(normalized))
    }

    /// Borrow the normalized address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Require a dotted host name ending in an alphabetic (or punycode) TLD.
///
/// `validate_email` also admits `user@localhost` and IP literals.
fn has_top_level_domain(address: &str) -> bool {
    let Some((_, domain)) = address.rsplit_once('@') else {
        return false;
    };
    if domain.starts_with('[') {
        return false;
    }
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    (tld.starts_with("xn--") && tld.len() > 4)
        || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Store-assigned registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submission that satisfied every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    full_name: String,
    country: String,
    email: EmailAddress,
    applicant: Applicant,
    message: String,
}

impl ValidRegistration {
    /// Normalized email used as the uniqueness key.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Applicant kind and kind-specific data.
    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }
}

impl TryFrom<RegistrationSubmission> for ValidRegistration {
    type Error = Vec<FieldViolation>;

    fn try_from(submission: RegistrationSubmission) -> Result<Self, Self::Error> {
        let mut check = FieldCheck::default();

        let full_name = check
            .required(Field::FullName, submission.full_name)
            .and_then(|name| {
                check.within(
                    Field::FullName,
                    name,
                    FULL_NAME_MIN,
                    FULL_NAME_MAX,
                    "Full name must be between 2-100 characters",
                )
            });
        let country = check
            .required(Field::Country, submission.country)
            .and_then(|country| {
                check.within(Field::Country, country, 1, COUNTRY_MAX, "Country name too long")
            });
        let email = check
            .required(Field::Email, submission.email)
            .and_then(|raw| match EmailAddress::parse(&raw) {
                Ok(email) => Some(email),
                Err(err) => {
                    check.reject(Field::Email, err.to_string());
                    None
                }
            });
        let user_type = check
            .required(Field::UserType, submission.user_type)
            .and_then(|raw| match raw.parse::<UserType>() {
                Ok(user_type) => Some(user_type),
                Err(_) => {
                    check.reject(Field::UserType, "Invalid user type");
                    None
                }
            });
        let applicant = match user_type {
            Some(UserType::Investor) => Some(Applicant::Investor),
            Some(UserType::General) => Some(Applicant::General),
            Some(UserType::IdeaOwner) => check
                .required(Field::IdeaCategory, submission.idea_category)
                .and_then(|category| {
                    check.within(
                        Field::IdeaCategory,
                        category,
                        1,
                        IDEA_CATEGORY_MAX,
                        "Idea category cannot exceed 100 characters",
                    )
                })
                .map(|idea_category| Applicant::IdeaOwner { idea_category }),
            None => None,
        };
        let message = check.optional(Field::Message, submission.message).and_then(|text| {
            check.within(
                Field::Message,
                text,
                0,
                MESSAGE_MAX,
                "Message cannot exceed 500 characters",
            )
        });

        match (full_name, country, email, applicant, message) {
            (Some(full_name), Some(country), Some(email), Some(applicant), Some(message))
                if check.is_clean() =>
            {
                Ok(Self {
                    full_name,
                    country,
                    email,
                    applicant,
                    message,
                })
            }
            _ => Err(check.into_violations()),
        }
    }
}

/// Accumulates violations while field rules are evaluated.
#[derive(Default)]
struct FieldCheck {
    violations: Vec<FieldViolation>,
}

impl FieldCheck {
    fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.violations
            .push(FieldViolation::new(field.as_str(), message));
    }

    /// Trimmed text of a required field.
    fn required(&mut self, field: Field, value: SubmittedValue) -> Option<String> {
        match value {
            SubmittedValue::Absent => {
                self.reject(field, field.required_message());
                None
            }
            SubmittedValue::NotText => {
                self.reject(field, format!("{} must be text", field.label()));
                None
            }
            SubmittedValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    self.reject(field, field.required_message());
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            }
        }
    }

    /// Trimmed text of an optional field, empty when absent.
    fn optional(&mut self, field: Field, value: SubmittedValue) -> Option<String> {
        match value {
            SubmittedValue::Absent => Some(String::new()),
            SubmittedValue::NotText => {
                self.reject(field, format!("{} must be text", field.label()));
                None
            }
            SubmittedValue::Text(raw) => Some(raw.trim().to_owned()),
        }
    }

    fn within(
        &mut self,
        field: Field,
        text: String,
        min: usize,
        max: usize,
        message: &str,
    ) -> Option<String> {
        let length = text.chars().count();
        if (min..=max).contains(&length) {
            Some(text)
        } else {
            self.reject(field, message);
            None
        }
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

/// Persisted early-access registration.
///
/// ## Invariants
/// - `email` is normalized and unique across all records.
/// - Records are never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Identifier assigned at creation.
    pub id: RegistrationId,
    /// Trimmed full name.
    pub full_name: String,
    /// Trimmed country name.
    pub country: String,
    /// Normalized email address.
    pub email: EmailAddress,
    /// Applicant kind and idea category for idea owners.
    pub applicant: Applicant,
    /// Trimmed message; empty when none was supplied.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Build a new record from a validated registration.
    pub fn create(
        registration: ValidRegistration,
        id: RegistrationId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ValidRegistration {
            full_name,
            country,
            email,
            applicant,
            message,
        } = registration;
        Self {
            id,
            full_name,
            country,
            email,
            applicant,
            message,
            created_at,
        }
    }

    /// The applicant's [`UserType`].
    pub fn user_type(&self) -> UserType {
        self.applicant.user_type()
    }
}

/// Outcome of a successful registration.
///
/// Deliberately omits the message and idea category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// Identifier of the stored record.
    pub id: RegistrationId,
    /// Normalized email as stored.
    pub email: EmailAddress,
    /// Applicant kind as stored.
    pub user_type: UserType,
}

impl From<&RegistrationRecord> for RegistrationSummary {
    fn from(record: &RegistrationRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            user_type: record.user_type(),
        }
    }
}
