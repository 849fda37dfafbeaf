//! Per-client request quota backed by `actix-governor`.
//!
//! The quota is a token bucket: a client may burst up to `max_requests`
//! and regains one request every `window / max_requests`.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError,
};
use actix_web::dev::ServiceRequest;
use thiserror::Error;

/// Requests allowed per client within [`DEFAULT_WINDOW`].
pub const DEFAULT_MAX_REQUESTS: u32 = 100;
/// Window over which [`DEFAULT_MAX_REQUESTS`] applies.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Keys clients by peer IP address.
///
/// Requests without a peer address (Unix sockets, in-process tests) share
/// the unspecified address bucket.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp;

impl KeyExtractor for ClientIp {
    type Key = IpAddr;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        Ok(req
            .peer_addr()
            .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |addr| addr.ip()))
    }
}

/// Invalid quota settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    #[error("rate limit must allow at least one request")]
    NoRequests,
    #[error("rate limit window of {window:?} is too short for {max_requests} requests")]
    WindowTooShort { max_requests: u32, window: Duration },
}

/// Shared request quota.
///
/// Clones share one limiter, so build it once and hand clones to every
/// worker.
#[derive(Clone)]
pub struct RateLimit {
    config: GovernorConfig<ClientIp, NoOpMiddleware>,
}

impl RateLimit {
    /// Allow `max_requests` per client within `window`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use early_access::middleware::RateLimit;
    ///
    /// let limit = RateLimit::new(100, Duration::from_secs(900)).expect("valid quota");
    /// let _app = actix_web::App::new().wrap(limit.middleware());
    /// ```
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, RateLimitError> {
        if max_requests == 0 {
            return Err(RateLimitError::NoRequests);
        }
        let period = window / max_requests;
        let config = GovernorConfigBuilder::default()
            .period(period)
            .burst_size(max_requests)
            .key_extractor(ClientIp)
            .finish()
            .ok_or(RateLimitError::WindowTooShort {
                max_requests,
                window,
            })?;
        Ok(Self { config })
    }

    /// Middleware enforcing this quota.
    pub fn middleware(&self) -> Governor<ClientIp, NoOpMiddleware> {
        Governor::new(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[case(0, Duration::from_secs(60), RateLimitError::NoRequests)]
    #[case(
        5,
        Duration::ZERO,
        RateLimitError::WindowTooShort { max_requests: 5, window: Duration::ZERO }
    )]
    fn unusable_quotas_are_rejected(
        #[case] max_requests: u32,
        #[case] window: Duration,
        #[case] expected: RateLimitError,
    ) {
        assert_eq!(RateLimit::new(max_requests, window).err(), Some(expected));
    }

    #[actix_web::test]
    async fn requests_beyond_quota_are_refused() {
        let limit = RateLimit::new(2, Duration::from_secs(60)).expect("valid quota");
        let app = actix_test::init_service(
            App::new()
                .wrap(limit.middleware())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let mut statuses = Vec::new();
        for _ in 0..3 {
            let req = actix_test::TestRequest::get()
                .uri("/")
                .peer_addr("203.0.113.7:4000".parse().expect("socket address"))
                .to_request();
            let status = match actix_test::try_call_service(&app, req).await {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            statuses.push(status);
        }

        assert_eq!(
            statuses,
            vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
        );
    }

    #[actix_web::test]
    async fn quotas_are_tracked_per_client() {
        let limit = RateLimit::new(1, Duration::from_secs(60)).expect("valid quota");
        let app = actix_test::init_service(
            App::new()
                .wrap(limit.middleware())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for peer in ["203.0.113.7:4000", "198.51.100.9:4000"] {
            let req = actix_test::TestRequest::get()
                .uri("/")
                .peer_addr(peer.parse().expect("socket address"))
                .to_request();
            let res = actix_test::try_call_service(&app, req).await;
            assert!(res.is_ok_and(|res| res.status() == StatusCode::OK));
        }
    }
}
