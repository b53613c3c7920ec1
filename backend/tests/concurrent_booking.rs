//! Concurrent booking attempts against the JSON file store.

use std::sync::Arc;

use booking_backend::domain::ports::{
    BookingStore, NewResource, ReservationCommand, ResourceCommand,
};
use booking_backend::domain::{
    BookingDraft, BookingError, BookingPolicy, BookingService, FacilityZone,
};
use booking_backend::outbound::persistence::JsonFileBookingStore;
use booking_backend::test_support::MutableClock;
use camino::Utf8PathBuf;
use futures::future::join_all;
use rstest::rstest;

fn draft(resource: &str, start_time: &str) -> BookingDraft {
    BookingDraft {
        resource_id: Some(resource.to_owned()),
        calendar_date: Some("2026-01-15".to_owned()),
        local_start_time: Some(start_time.to_owned()),
        duration_minutes: Some(60.0),
        customer_name: Some("Ana".to_owned()),
        customer_phone: None,
        customer_email: None,
        service_id: Some("padel".to_owned()),
        service_label: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_of_many_overlapping_requests_is_stored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("db.json")).expect("utf-8 path");
    let zone = FacilityZone::parse("Europe/Madrid").expect("zone");
    let store = Arc::new(JsonFileBookingStore::new(path, zone));
    let service = Arc::new(BookingService::new(
        store.clone(),
        Arc::new(MutableClock::at_utc(2026, 1, 10, 12)),
        BookingPolicy::with_zone(zone),
    ));
    let court = service
        .create_resource(NewResource {
            name: Some("Pista 1".to_owned()),
            description: None,
        })
        .await
        .expect("resource");
    let court_id = court.id.to_string();

    let attempts: Vec<_> = (0..12)
        .map(|i| {
            let service = service.clone();
            let start = if i % 2 == 0 { "10:00" } else { "10:30" };
            let request = draft(&court_id, start);
            tokio::spawn(async move { service.create_reservation(request).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for attempt in join_all(attempts).await {
        match attempt.expect("task") {
            Ok(_) => created += 1,
            Err(BookingError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 11);
    let stored = store.load().await.expect("reload");
    assert_eq!(stored.reservations.len(), 1);
}
