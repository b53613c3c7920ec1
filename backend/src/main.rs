//! Backend entry-point: loads configuration, wires the booking service and
//! serves the REST API until shutdown.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use booking_backend::demo_data::seed_demo_data;
use booking_backend::domain::BookingService;
use booking_backend::inbound::http::status::HealthState;
use booking_backend::outbound::notification::LogReservationNotifier;
use booking_backend::outbound::persistence::JsonFileBookingStore;
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let policy = settings.booking_policy().map_err(io::Error::other)?;
    let data_path = settings.data_path().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let status = settings.status_info().map_err(io::Error::other)?;
    let admin_auth = settings.admin_auth();
    if !admin_auth.is_enabled() {
        warn!(environment = settings.environment(), "admin endpoints are not authenticated");
    }

    let store = Arc::new(JsonFileBookingStore::new(data_path, policy.zone));
    let service = Arc::new(BookingService::new(
        store,
        Arc::new(DefaultClock),
        policy,
    ));
    seed_demo_data(settings.seed_demo, service.as_ref(), service.as_ref())
        .await
        .map_err(io::Error::other)?;

    let http_state = build_http_state(
        service.clone(),
        Arc::new(LogReservationNotifier),
        admin_auth,
        status,
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, http_state))?;
    info!(%bind_addr, zone = policy.zone.name(), "booking server listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    service.shutdown().await;
    info!("booking server stopped");
    outcome
}
