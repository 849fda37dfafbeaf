//! Tests for the registration HTTP handler.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockRegistrationCommand, MockStoreHealth};
use crate::domain::{EmailAddress, Error, FieldViolation, RegistrationId, UserType};
use crate::inbound::http::payload::json_config;

fn test_app(
    command: MockRegistrationCommand,
    expose_error_details: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(command), Arc::new(MockStoreHealth::new()))
        .with_error_details(expose_error_details);
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(web::scope("/api").service(register))
}

fn summary(email: &str, user_type: UserType) -> RegistrationSummary {
    RegistrationSummary {
        id: RegistrationId::from_uuid(Uuid::nil()),
        email: EmailAddress::parse(email).expect("valid email"),
        user_type,
    }
}

async fn post_json(command: MockRegistrationCommand, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(command, false)).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(&body)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    let status = res.status();
    let body = actix_test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_summary() {
    let mut command = MockRegistrationCommand::new();
    command
        .expect_register()
        .withf(|submission| {
            submission.email == SubmittedValue::text("ANA@Example.com")
                && submission.idea_category == SubmittedValue::Absent
        })
        .times(1)
        .return_once(|_| Ok(summary("ana@example.com", UserType::General)));

    let (status, body) = post_json(
        command,
        json!({
            "fullName": "Ana Silva",
            "country": "Brazil",
            "email": "ANA@Example.com",
            "userType": "general",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": SUCCESS_MESSAGE,
            "data": {
                "id": Uuid::nil().to_string(),
                "email": "ana@example.com",
                "userType": "general",
            },
        })
    );
}

#[rstest]
#[actix_web::test]
async fn scalar_values_are_passed_as_text() {
    let mut command = MockRegistrationCommand::new();
    command
        .expect_register()
        .withf(|submission| {
            submission.full_name == SubmittedValue::text("12345")
                && submission.country == SubmittedValue::text("true")
                && submission.message == SubmittedValue::Absent
        })
        .times(1)
        .return_once(|_| Ok(summary("a@b.co", UserType::Investor)));

    let (status, _) = post_json(
        command,
        json!({
            "fullName": 12345,
            "country": true,
            "email": "a@b.co",
            "userType": "investor",
            "message": null,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn structured_values_are_marked_as_non_text() {
    let mut command = MockRegistrationCommand::new();
    command
        .expect_register()
        .withf(|submission| {
            submission.full_name == SubmittedValue::NotText
                && submission.idea_category == SubmittedValue::NotText
        })
        .times(1)
        .return_once(|_| {
            Err(Error::validation(vec![FieldViolation::new(
                "fullName",
                "Full name must be text",
            )]))
        });

    let (status, body) = post_json(
        command,
        json!({"fullName": ["Ana"], "ideaCategory": {"name": "x"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], json!("fullName"));
}

#[rstest]
#[actix_web::test]
async fn conflict_renders_duplicate_envelope() {
    let mut command = MockRegistrationCommand::new();
    command
        .expect_register()
        .return_once(|_| Err(Error::conflict("This email address is already registered")));

    let (status, body) = post_json(command, json!({"email": "ana@example.com"})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Email already registered"));
    assert_eq!(
        body["message"],
        json!("This email address is already registered")
    );
}

#[rstest]
#[case(false, "An unexpected error occurred. Please try again later.")]
#[case(true, "registration store unavailable: refused")]
#[actix_web::test]
async fn store_failures_render_internal_error(#[case] expose: bool, #[case] expected: &str) {
    let mut command = MockRegistrationCommand::new();
    command.expect_register().return_once(|_| {
        Err(Error::service_unavailable(
            "registration store unavailable: refused",
        ))
    });
    let app = actix_test::init_service(test_app(command, expose)).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({}))
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Internal Server Error"));
    assert_eq!(body["message"], json!(expected));
}

#[rstest]
#[case::malformed(ContentType::json(), "{\"fullName\":".to_owned())]
#[case::not_an_object(ContentType::json(), "[1, 2]".to_owned())]
#[case::positional_fields(
    ContentType::json(),
    r#"["Ana Silva","Brazil","ana@example.com","general"]"#.to_owned()
)]
#[case::bare_string(ContentType::json(), r#""ana@example.com""#.to_owned())]
#[case::wrong_content_type(ContentType::plaintext(), "{}".to_owned())]
#[case::oversized(ContentType::json(), format!("{{\"message\":\"{}\"}}", "m".repeat(11 * 1024)))]
#[actix_web::test]
async fn unreadable_bodies_are_rejected_before_the_domain(
    #[case] content_type: ContentType,
    #[case] payload: String,
) {
    let mut command = MockRegistrationCommand::new();
    command.expect_register().never();
    let app = actix_test::init_service(test_app(command, false)).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/register")
        .insert_header(content_type)
        .set_payload(payload)
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"][0]["field"], json!("body"));
}
