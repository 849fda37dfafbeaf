//! JSON body extraction policy.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::{Error, FieldViolation};
use crate::inbound::http::error::ApiError;

/// Largest accepted request body, in bytes.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024;

/// Field name used for violations that concern the body as a whole.
pub const BODY_FIELD: &str = "body";

/// Extractor configuration applied to every JSON endpoint.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use early_access::inbound::http::payload::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT_BYTES)
        .error_handler(body_error)
}

fn body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "request body rejected");
    let message = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body cannot exceed 10 KiB"
        }
        JsonPayloadError::ContentType => "Request body must be JSON",
        JsonPayloadError::Deserialize(_) => "Request body must be a valid JSON object",
        _ => "Request body could not be read",
    };
    let violation = FieldViolation::new(BODY_FIELD, message);
    ApiError::from(Error::validation(vec![violation])).into()
}
