//! Tests for the registration service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockRegistrationRepository;
use crate::domain::{Applicant, EmailAddress, ErrorCode, SubmittedValue, UserType};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(
    repo: MockRegistrationRepository,
) -> RegistrationService<MockRegistrationRepository> {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    });
    RegistrationService::new(Arc::new(repo), clock)
}

#[fixture]
fn submission() -> RegistrationSubmission {
    RegistrationSubmission {
        full_name: SubmittedValue::text("Ana Silva"),
        country: SubmittedValue::text("Brazil"),
        email: SubmittedValue::text("Ana@Example.com"),
        user_type: SubmittedValue::text("investor"),
        ..RegistrationSubmission::default()
    }
}

fn existing_record() -> RegistrationRecord {
    RegistrationRecord {
        id: RegistrationId::random(),
        full_name: "Ana Silva".to_owned(),
        country: "Brazil".to_owned(),
        email: EmailAddress::parse("ana@example.com").expect("valid email"),
        applicant: Applicant::General,
        message: String::new(),
        created_at: fixture_timestamp(),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_normalized_record(submission: RegistrationSubmission) {
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email.as_str() == "ana@example.com")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|record| {
            record.email.as_str() == "ana@example.com"
                && record.full_name == "Ana Silva"
                && record.created_at == fixture_timestamp()
        })
        .times(1)
        .returning(|record| Ok(record.clone()));

    let summary = make_service(repo)
        .register(submission)
        .await
        .expect("registration succeeds");

    assert_eq!(summary.email.as_str(), "ana@example.com");
    assert_eq!(summary.user_type, UserType::Investor);
}

#[rstest]
#[tokio::test]
async fn register_returns_store_assigned_id(submission: RegistrationSubmission) {
    let stored = RegistrationRecord {
        applicant: Applicant::Investor,
        ..existing_record()
    };
    let stored_id = stored.id;
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_insert().return_once(move |_| Ok(stored));

    let summary = make_service(repo)
        .register(submission)
        .await
        .expect("registration succeeds");

    assert_eq!(summary.id, stored_id);
}

#[rstest]
#[tokio::test]
async fn invalid_submission_never_touches_the_store() {
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email().never();
    repo.expect_insert().never();

    let error = make_service(repo)
        .register(RegistrationSubmission::default())
        .await
        .expect_err("validation error");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let fields: Vec<_> = error.violations().iter().map(|v| v.field()).collect();
    assert_eq!(fields, vec!["fullName", "country", "email", "userType"]);
}

#[rstest]
#[tokio::test]
async fn existing_email_is_a_conflict(submission: RegistrationSubmission) {
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(existing_record())));
    repo.expect_insert().never();

    let error = make_service(repo)
        .register(submission)
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn racing_duplicate_rejected_by_store_is_a_conflict(submission: RegistrationSubmission) {
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(RegistrationRepositoryError::duplicate_email("email")));

    let error = make_service(repo)
        .register(submission)
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[case(
    RegistrationRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case(RegistrationRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn lookup_failures_map_to_store_errors(
    submission: RegistrationSubmission,
    #[case] failure: RegistrationRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email()
        .return_once(move |_| Err(failure));
    repo.expect_insert().never();

    let error = make_service(repo)
        .register(submission)
        .await
        .expect_err("store error");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn insert_failure_is_internal(submission: RegistrationSubmission) {
    let mut repo = MockRegistrationRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|_| Err(RegistrationRepositoryError::query("disk full")));

    let error = make_service(repo)
        .register(submission)
        .await
        .expect_err("store error");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(error.message().contains("disk full"));
}
