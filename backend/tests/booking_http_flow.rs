//! End-to-end booking flow over the HTTP adapter backed by the JSON file
//! store.
//!
//! Each test works in its own temporary directory so the document written
//! by one request is what the next request reads.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use booking_backend::RequestTrace;
use booking_backend::domain::ports::BookingStore;
use booking_backend::domain::{BookingPolicy, BookingService, FacilityZone};
use booking_backend::inbound::http::admin_auth::AdminAuth;
use booking_backend::inbound::http::configure;
use booking_backend::inbound::http::state::{HttpState, HttpStatePorts, StatusInfo};
use booking_backend::outbound::notification::LogReservationNotifier;
use booking_backend::outbound::persistence::JsonFileBookingStore;
use booking_backend::test_support::MutableClock;
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Workspace {
    _dir: tempfile::TempDir,
    path: Utf8PathBuf,
    zone: FacilityZone,
}

impl Workspace {
    fn store(&self) -> JsonFileBookingStore {
        JsonFileBookingStore::new(self.path.clone(), self.zone)
    }

    fn state(&self, admin_auth: AdminAuth) -> web::Data<HttpState> {
        let service = Arc::new(BookingService::new(
            Arc::new(self.store()),
            Arc::new(MutableClock::at_utc(2026, 1, 10, 12)),
            BookingPolicy::with_zone(self.zone),
        ));
        let ports = HttpStatePorts {
            reservations: service.clone(),
            reservations_query: service.clone(),
            resources: service.clone(),
            settings: service,
            notifier: Arc::new(LogReservationNotifier),
        };
        web::Data::new(HttpState::new(
            ports,
            admin_auth,
            StatusInfo {
                environment: "test".to_owned(),
                zone: self.zone,
            },
        ))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("data").join("db.json"))
        .expect("utf-8 temp path");
    Workspace {
        _dir: dir,
        path,
        zone: FacilityZone::parse("Europe/Madrid").expect("zone"),
    }
}

fn reservation(resource: &str, start_time: &str, duration: u32) -> Value {
    json!({
        "pistaId": resource,
        "date": "2026-01-15",
        "startTime": start_time,
        "durationMin": duration,
        "nombre": "Ana",
        "telefono": "600000000",
        "servicioId": "padel",
    })
}

#[rstest]
#[actix_web::test]
async fn booking_lifecycle_persists_to_the_document(workspace: Workspace) {
    let app = test::init_service(
        App::new()
            .app_data(workspace.state(AdminAuth::disabled()))
            .wrap(RequestTrace)
            .configure(configure),
    )
    .await;

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/pistas")
            .set_json(json!({ "nombre": "Pista Central", "descripcion": "Cubierta" }))
            .to_request(),
    )
    .await;
    let court = created["id"].as_str().expect("resource id").to_owned();

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/reservas")
            .set_json(reservation(&court, "10:00", 60))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let booked: Value = test::read_body_json(first).await;
    assert_eq!(booked["start"], "2026-01-15T09:00:00Z");

    let overlapping = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/reservas")
            .set_json(reservation(&court, "10:30", 60))
            .to_request(),
    )
    .await;
    assert_eq!(overlapping.status(), StatusCode::CONFLICT);

    let touching = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/reservas")
            .set_json(reservation(&court, "11:00", 30))
            .to_request(),
    )
    .await;
    assert_eq!(touching.status(), StatusCode::CREATED);

    let reloaded = workspace.store().load().await.expect("reload");
    assert_eq!(reloaded.resources.len(), 1);
    assert_eq!(reloaded.reservations.len(), 2);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/admin/pistas/{court}"))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let after_delete = workspace.store().load().await.expect("reload");
    assert!(after_delete.resources.is_empty());
    assert!(after_delete.reservations.is_empty());
}

#[rstest]
#[actix_web::test]
async fn public_views_hide_contact_details(workspace: Workspace) {
    let app = test::init_service(
        App::new()
            .app_data(workspace.state(AdminAuth::required("admin", "secret", "Reservas Admin")))
            .configure(configure),
    )
    .await;
    let unauthorised = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/pistas")
            .set_json(json!({ "nombre": "Pista Central" }))
            .to_request(),
    )
    .await;
    assert_eq!(unauthorised.status(), StatusCode::UNAUTHORIZED);

    // admin:secret
    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/pistas")
            .insert_header(("Authorization", "Basic YWRtaW46c2VjcmV0"))
            .set_json(json!({ "nombre": "Pista Central" }))
            .to_request(),
    )
    .await;
    let court = created["id"].as_str().expect("resource id").to_owned();
    let booked = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/reservas")
            .set_json(reservation(&court, "18:00", 90))
            .to_request(),
    )
    .await;
    assert_eq!(booked.status(), StatusCode::CREATED);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/reservas?pistaId={court}&date=2026-01-15"))
            .to_request(),
    )
    .await;
    let entries = listed.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["startTime"], "18:00");
    assert!(entries[0].get("telefono").is_none());
    assert!(entries[0].get("nombre").is_none());

    let slots: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/disponibilidad?pistaId={court}&date=2026-01-15"))
            .to_request(),
    )
    .await;
    let taken: Vec<&str> = slots
        .as_array()
        .expect("array")
        .iter()
        .filter(|slot| slot["available"] == false)
        .filter_map(|slot| slot["localStart"].as_str())
        .collect();
    assert_eq!(taken, ["18:00", "19:00"]);
}
