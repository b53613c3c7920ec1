//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{FixtureReservationNotifier, ReservationNotifier};
use crate::domain::{
    BookingPolicy, BookingService, BookingSnapshot, FacilityZone, Resource, ResourceId,
};
use crate::outbound::persistence::InMemoryBookingStore;
use crate::test_support::MutableClock;

use super::admin_auth::AdminAuth;
use super::state::{HttpState, HttpStatePorts, StatusInfo};

pub const COURT: &str = "PISTA_01";

pub fn madrid() -> FacilityZone {
    FacilityZone::parse("Europe/Madrid").expect("known zone")
}

/// Store holding one court and nothing else.
pub fn seeded_store() -> Arc<InMemoryBookingStore> {
    Arc::new(InMemoryBookingStore::new(BookingSnapshot {
        resources: vec![Resource {
            id: ResourceId::from(COURT),
            name: "Pista 1".to_owned(),
            description: "Indoor".to_owned(),
            created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        }],
        ..BookingSnapshot::default()
    }))
}

/// HTTP state over a real booking service with the clock at
/// 2026-01-10 12:00Z.
pub fn booking_state(
    store: Arc<InMemoryBookingStore>,
    notifier: Arc<dyn ReservationNotifier>,
    admin_auth: AdminAuth,
) -> HttpState {
    let service = Arc::new(BookingService::new(
        store,
        Arc::new(MutableClock::at_utc(2026, 1, 10, 12)),
        BookingPolicy::with_zone(madrid()),
    ));
    HttpState::new(
        HttpStatePorts {
            reservations: service.clone(),
            reservations_query: service.clone(),
            resources: service.clone(),
            settings: service,
            notifier,
        },
        admin_auth,
        StatusInfo {
            environment: "test".to_owned(),
            zone: madrid(),
        },
    )
}

/// [`booking_state`] with admin auth off and a no-op notifier.
pub fn open_state(store: Arc<InMemoryBookingStore>) -> HttpState {
    booking_state(store, Arc::new(FixtureReservationNotifier), AdminAuth::disabled())
}
