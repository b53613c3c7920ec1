//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::AppSettings;
pub(crate) use state_builders::build_http_state;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use booking_backend::RequestTrace;
use booking_backend::inbound::http::state::HttpState;
use booking_backend::inbound::http::status::{HealthState, live, ready};
use booking_backend::inbound::http::{configure, not_found};

/// Everything the HTTP server needs once the domain is wired.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: web::Data<HttpState>) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestTrace)
        .configure(configure)
        .service(ready)
        .service(live)
        .default_service(web::to(not_found))
}

/// Construct an Actix HTTP server serving the booking API.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;

    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .bind(bind_addr)?
            .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use booking_backend::domain::{BookingPolicy, BookingService, FacilityZone};
    use booking_backend::inbound::http::admin_auth::AdminAuth;
    use booking_backend::inbound::http::state::StatusInfo;
    use booking_backend::outbound::notification::LogReservationNotifier;
    use booking_backend::outbound::persistence::InMemoryBookingStore;
    use booking_backend::test_support::MutableClock;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    fn http_state() -> web::Data<HttpState> {
        let zone = FacilityZone::parse("Europe/Madrid").expect("zone");
        let service = Arc::new(BookingService::new(
            Arc::new(InMemoryBookingStore::default()),
            Arc::new(MutableClock::at_utc(2026, 1, 10, 12)),
            BookingPolicy::with_zone(zone),
        ));
        build_http_state(
            service,
            Arc::new(LogReservationNotifier),
            AdminAuth::disabled(),
            StatusInfo {
                environment: "test".to_owned(),
                zone,
            },
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_status_probes_and_unknown_routes() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = test::init_service(build_app(health, http_state())).await;

        let status = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/status").to_request(),
        )
        .await;
        assert_eq!(status.status(), StatusCode::OK);
        assert!(status.headers().contains_key("request-id"));
        let body: Value = test::read_body_json(status).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["env"], "test");

        let probe = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(probe.status(), StatusCode::OK);

        let missing = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/nope").to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(missing).await;
        assert_eq!(body["code"], "not_found");
    }
}
