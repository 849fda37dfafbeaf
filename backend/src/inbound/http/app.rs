//! Actix application assembly.
//!
//! The binary and the integration tests share this so both exercise the same
//! routes, extractor limits and middleware order.

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, health, live, ready};
use crate::inbound::http::payload::json_config;
use crate::inbound::http::registration::register;
#[cfg(debug_assertions)]
use crate::inbound::http::root::DOCS_PATH;
use crate::inbound::http::root::{not_found, welcome};
use crate::inbound::http::state::HttpState;
use crate::middleware::{RateLimit, Trace, security_headers};

/// Shared state handed to every worker's application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    /// Per-client quota shared across workers.
    pub rate_limit: RateLimit,
}

/// Build the application with all routes and middleware mounted.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        rate_limit,
    } = deps;

    let api = web::scope("/api").service(register);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(rate_limit.middleware())
        .wrap(security_headers())
        .wrap(Trace)
        .service(api)
        .service(health)
        .service(ready)
        .service(live)
        .service(welcome);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new(DOCS_PATH).url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}
