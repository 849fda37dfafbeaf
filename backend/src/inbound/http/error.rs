//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while giving handlers one place
//! that turns failures into the public JSON envelopes and status codes.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Label returned with 409 responses.
pub const CONFLICT_LABEL: &str = "Email already registered";
/// Label returned with 500 responses.
pub const INTERNAL_LABEL: &str = "Internal Server Error";
/// Message returned with 500 responses when details are hidden.
pub const GENERIC_INTERNAL_MESSAGE: &str =
    "An unexpected error occurred. Please try again later.";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// One rejected field in a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldErrorBody {
    /// Wire name of the offending field.
    #[schema(example = "email")]
    pub field: String,
    /// Human-readable reason.
    #[schema(example = "Please provide a valid email")]
    pub message: String,
}

/// Failure envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Short label for conflict and server failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Explanation for the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Every violated field rule, in field order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorBody>,
}

impl ErrorResponse {
    fn new() -> Self {
        Self {
            success: false,
            error: None,
            message: None,
            errors: Vec::new(),
        }
    }
}

/// Domain error paired with the rendering policy for server failures.
#[derive(Debug, Clone)]
pub struct ApiError {
    error: Error,
    expose_details: bool,
}

impl ApiError {
    /// Wrap `error`; `expose_details` reveals server-side causes to callers.
    pub fn new(error: Error, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }

    /// The wrapped domain error.
    pub fn error(&self) -> &Error {
        &self.error
    }

    fn body(&self) -> ErrorResponse {
        let mut body = ErrorResponse::new();
        match self.error.code() {
            ErrorCode::InvalidRequest => {
                body.errors = self
                    .error
                    .violations()
                    .iter()
                    .map(|violation| FieldErrorBody {
                        field: violation.field().to_owned(),
                        message: violation.message().to_owned(),
                    })
                    .collect();
                if body.errors.is_empty() {
                    body.message = Some(self.error.message().to_owned());
                }
            }
            ErrorCode::Conflict => {
                body.error = Some(CONFLICT_LABEL.to_owned());
                body.message = Some(self.error.message().to_owned());
            }
            ErrorCode::NotFound => {
                body.message = Some(self.error.message().to_owned());
            }
            _ => {
                body.error = Some(INTERNAL_LABEL.to_owned());
                body.message = Some(if self.expose_details {
                    self.error.message().to_owned()
                } else {
                    GENERIC_INTERNAL_MESSAGE.to_owned()
                });
            }
        }
        body
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self::new(error, false)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        // Store outages are reported as plain server errors on the wire.
        ErrorCode::ServiceUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.error.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.body())
    }
}
