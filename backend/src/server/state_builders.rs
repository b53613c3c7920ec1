//! Builders wiring the booking service into HTTP state.

use std::sync::Arc;

use actix_web::web;

use booking_backend::domain::BookingService;
use booking_backend::domain::ports::{BookingStore, ReservationNotifier};
use booking_backend::inbound::http::admin_auth::AdminAuth;
use booking_backend::inbound::http::state::{HttpState, HttpStatePorts, StatusInfo};

/// Expose one booking service through every driving port the HTTP adapter
/// needs.
pub(crate) fn build_http_state<S>(
    service: Arc<BookingService<S>>,
    notifier: Arc<dyn ReservationNotifier>,
    admin_auth: AdminAuth,
    status: StatusInfo,
) -> web::Data<HttpState>
where
    S: BookingStore + 'static,
{
    let ports = HttpStatePorts {
        reservations: service.clone(),
        reservations_query: service.clone(),
        resources: service.clone(),
        settings: service,
        notifier,
    };
    web::Data::new(HttpState::new(ports, admin_auth, status))
}
