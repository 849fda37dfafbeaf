//! Request middleware for tracing, rate limiting and response hardening.

pub mod rate_limit;
pub mod trace;

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

pub use rate_limit::{RateLimit, RateLimitError};
pub use trace::Trace;

/// Headers added to every response.
///
/// The API is public and unauthenticated, so any origin may read it.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use early_access::middleware::security_headers;
///
/// let _app = App::new().wrap(security_headers());
/// ```
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .add((header::X_FRAME_OPTIONS, "DENY"))
}
