//! Service banner and the fallback for unknown routes.

use actix_web::{HttpResponse, get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Path of the Swagger UI, mounted in debug builds only.
pub const DOCS_PATH: &str = "/docs";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to Fikra Market API")]
    pub message: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    /// Where the interactive API documentation is served; absent in release
    /// builds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/docs")]
    pub documentation: Option<String>,
}

/// Describe the service.
#[utoipa::path(
    get,
    path = "/",
    tags = ["meta"],
    security([]),
    responses((status = 200, description = "Service banner", body = WelcomeResponse))
)]
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(WelcomeResponse {
        message: "Welcome to Fikra Market API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        documentation: cfg!(debug_assertions).then(|| DOCS_PATH.to_owned()),
    })
}

/// Default service for unmatched routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Resource not found").into())
}
