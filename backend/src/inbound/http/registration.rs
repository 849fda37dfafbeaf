//! Early-access registration endpoint.
//!
//! ```text
//! POST /api/register {"fullName":"Ana Silva","country":"Brazil","email":"ana@example.com","userType":"general"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{RegistrationSubmission, RegistrationSummary, SubmittedValue};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorResponse};
use crate::inbound::http::schemas::UserTypeSchema;
use crate::inbound::http::state::HttpState;

/// Message returned with every successful registration.
pub const SUCCESS_MESSAGE: &str = "Thanks for joining Fikra Market! We will contact you soon.";

/// Registration request body.
///
/// The body must be a JSON object. Fields are read leniently: numbers and
/// booleans are treated as their text form, while arrays and objects are
/// rejected per field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(value_type = String, example = "Ana Silva")]
    pub full_name: Option<Value>,
    #[schema(value_type = String, example = "Brazil")]
    pub country: Option<Value>,
    #[schema(value_type = String, example = "ana@example.com")]
    pub email: Option<Value>,
    /// One of `investor`, `idea_owner` or `general`.
    #[schema(value_type = UserTypeSchema)]
    pub user_type: Option<Value>,
    /// Required when `userType` is `idea_owner`.
    #[schema(value_type = Option<String>, example = "fintech")]
    pub idea_category: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
}

impl From<Map<String, Value>> for RegisterRequest {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            full_name: fields.remove("fullName"),
            country: fields.remove("country"),
            email: fields.remove("email"),
            user_type: fields.remove("userType"),
            idea_category: fields.remove("ideaCategory"),
            message: fields.remove("message"),
        }
    }
}

fn submitted(value: Option<Value>) -> SubmittedValue {
    match value {
        None | Some(Value::Null) => SubmittedValue::Absent,
        Some(Value::String(text)) => SubmittedValue::Text(text),
        Some(Value::Number(number)) => SubmittedValue::Text(number.to_string()),
        Some(Value::Bool(flag)) => SubmittedValue::Text(flag.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => SubmittedValue::NotText,
    }
}

impl From<RegisterRequest> for RegistrationSubmission {
    fn from(value: RegisterRequest) -> Self {
        Self {
            full_name: submitted(value.full_name),
            country: submitted(value.country),
            email: submitted(value.email),
            user_type: submitted(value.user_type),
            idea_category: submitted(value.idea_category),
            message: submitted(value.message),
        }
    }
}

/// Stored registration as echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub id: Uuid,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(value_type = UserTypeSchema)]
    pub user_type: String,
}

impl From<RegistrationSummary> for RegistrationData {
    fn from(value: RegistrationSummary) -> Self {
        Self {
            id: *value.id.as_uuid(),
            email: value.email.into(),
            user_type: value.user_type.as_str().to_owned(),
        }
    }
}

/// Success envelope for `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    #[schema(example = "Thanks for joining Fikra Market! We will contact you soon.")]
    pub message: String,
    pub data: RegistrationData,
}

impl From<RegistrationSummary> for RegisterResponse {
    fn from(value: RegistrationSummary) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_owned(),
            data: value.into(),
        }
    }
}

/// Register interest in early access.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration stored", body = RegisterResponse),
        (status = 400, description = "Invalid submission", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["registration"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let request = RegisterRequest::from(payload.into_inner());
    let submission = RegistrationSubmission::from(request);
    let summary = state
        .registration
        .register(submission)
        .await
        .map_err(|err| ApiError::new(err, state.expose_error_details))?;
    Ok(HttpResponse::Created().json(RegisterResponse::from(summary)))
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
