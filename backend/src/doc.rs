//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together with
//! the response envelopes and the domain schema wrappers from
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::{ErrorResponse, FieldErrorBody};
use crate::inbound::http::health::{DatabaseStatus, HealthReport};
use crate::inbound::http::registration::{RegisterRequest, RegisterResponse, RegistrationData};
use crate::inbound::http::root::WelcomeResponse;
use crate::inbound::http::schemas::UserTypeSchema;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fikra Market early-access API",
        description = "Collects early-access signups for the Fikra Market platform."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::registration::register,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::root::welcome,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        RegistrationData,
        ErrorResponse,
        FieldErrorBody,
        HealthReport,
        DatabaseStatus,
        WelcomeResponse,
        UserTypeSchema,
    )),
    tags(
        (name = "registration", description = "Early-access signup"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "meta", description = "Service information")
    )
)]
pub struct ApiDoc;
