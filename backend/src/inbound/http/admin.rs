//! Admin reservation and settings HTTP handlers.
//!
//! ```text
//! GET    /api/admin/reservas?pistaId&date
//! DELETE /api/admin/reservas/{id}
//! POST   /api/admin/reservas/purge
//! GET    /api/admin/settings
//! PUT    /api/admin/settings
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::domain::ports::PurgeRequest;
use crate::domain::{Error, ReservationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin_auth::AdminAccess;
use crate::inbound::http::dto::{
    PurgeBody, PurgeResponse, ReservationResponse, ResourceDateQuery, SettingsRequest,
    SettingsResponse, booking_error,
};
use crate::inbound::http::state::HttpState;

/// Full reservation records, customer contact included.
#[get("/reservas")]
pub async fn admin_list_reservations(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    query: web::Query<ResourceDateQuery>,
) -> ApiResult<web::Json<Vec<ReservationResponse>>> {
    let reservations = state
        .reservations_query
        .list_reservations(query.filter()?)
        .await
        .map_err(booking_error)?;
    Ok(web::Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

#[delete("/reservas/{id}")]
pub async fn delete_reservation(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = ReservationId::from(path.into_inner());
    if state
        .reservations
        .delete_reservation(&id)
        .await
        .map_err(booking_error)?
    {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("reservation not found")
            .with_details(json!({ "code": "not_found", "id": id.as_str() })))
    }
}

/// Drop reservations dated before `before`, judged in `timezone` or the
/// facility zone.
#[post("/reservas/purge")]
pub async fn purge_reservations(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    payload: web::Json<PurgeBody>,
) -> ApiResult<web::Json<PurgeResponse>> {
    let (before, zone) = payload.parse()?;
    let removed_count = state
        .reservations
        .delete_reservations_before(PurgeRequest { before, zone })
        .await
        .map_err(booking_error)?;
    Ok(web::Json(PurgeResponse { removed_count }))
}

#[get("/settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
) -> ApiResult<web::Json<SettingsResponse>> {
    let settings = state.settings.settings().await.map_err(booking_error)?;
    Ok(web::Json(settings.into()))
}

#[put("/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    payload: web::Json<SettingsRequest>,
) -> ApiResult<web::Json<SettingsResponse>> {
    let settings = state
        .settings
        .update_settings(payload.into_inner().into())
        .await
        .map_err(booking_error)?;
    Ok(web::Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
    use actix_web::{App, test};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::FixtureReservationNotifier;
    use crate::inbound::http::admin_auth::AdminAuth;
    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{COURT, booking_state, open_state, seeded_store};

    fn book(time: &str, date: &str) -> test::TestRequest {
        test::TestRequest::post().uri("/api/reservas").set_json(json!({
            "pistaId": COURT,
            "date": date,
            "startTime": time,
            "durationMin": 60,
            "nombre": "Ana",
            "telefono": "600000000",
            "servicioId": "padel",
            "tipoCorte": "Clase"
        }))
    }

    #[actix_web::test]
    async fn admin_listing_includes_customer_contact() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(open_state(seeded_store())))
                .configure(configure),
        )
        .await;
        test::call_service(&app, book("10:00", "2026-01-15").to_request()).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/admin/reservas").to_request(),
        )
        .await;

        assert_eq!(body[0]["nombre"], "Ana");
        assert_eq!(body[0]["telefono"], "600000000");
        assert_eq!(body[0]["servicioId"], "padel");
        assert_eq!(body[0]["tipoCorte"], "Clase");
    }

    #[actix_web::test]
    async fn delete_reservation_answers_no_content_then_not_found() {
        let store = seeded_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(open_state(store.clone())))
                .configure(configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, book("10:00", "2026-01-15").to_request()).await;
        let uri = format!(
            "/api/admin/reservas/{}",
            created["id"].as_str().expect("id")
        );

        let first = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request());
        assert_eq!(first.await.status(), StatusCode::NO_CONTENT);
        let second = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request());
        assert_eq!(second.await.status(), StatusCode::NOT_FOUND);
        assert!(store.snapshot().await.reservations.is_empty());
    }

    #[actix_web::test]
    async fn purge_reports_removed_count() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(open_state(seeded_store())))
                .configure(configure),
        )
        .await;
        for date in ["2026-01-12", "2026-01-13", "2026-01-20"] {
            test::call_service(&app, book("10:00", date).to_request()).await;
        }

        let req = test::TestRequest::post()
            .uri("/api/admin/reservas/purge")
            .set_json(json!({ "before": "2026-01-14", "timezone": "Europe/Madrid" }))
            .to_request();
        let body: PurgeResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.removed_count, 2);
    }

    #[actix_web::test]
    async fn settings_round_trip_with_empty_secret_by_default() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(open_state(seeded_store())))
                .configure(configure),
        )
        .await;

        let initial: SettingsResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/admin/settings").to_request(),
        )
        .await;
        assert!(!initial.smtp_pass_set);

        let req = test::TestRequest::put()
            .uri("/api/admin/settings")
            .set_json(json!({ "adminEmail": "admin@example.com", "smtpPass": "app-pass" }))
            .to_request();
        let updated: SettingsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            updated,
            SettingsResponse {
                admin_email: "admin@example.com".to_owned(),
                smtp_pass_set: true,
            }
        );
    }

    #[actix_web::test]
    async fn settings_responses_never_contain_the_stored_secret() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(open_state(seeded_store())))
                .configure(configure),
        )
        .await;

        let put = test::TestRequest::put()
            .uri("/api/admin/settings")
            .set_json(json!({ "smtpPass": "s3cret-app-pass" }))
            .to_request();
        let put_body = test::call_and_read_body(&app, put).await;
        let get = test::TestRequest::get().uri("/api/admin/settings").to_request();
        let get_body = test::call_and_read_body(&app, get).await;

        for body in [put_body, get_body] {
            let text = std::str::from_utf8(&body).expect("utf8 body");
            assert!(!text.contains("s3cret-app-pass"));
            let value: Value = serde_json::from_str(text).expect("json body");
            assert_eq!(value["smtpPassSet"], true);
            assert!(value.get("smtpPass").is_none());
        }
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some(("admin", "wrong")), StatusCode::UNAUTHORIZED)]
    #[case(Some(("admin", "secret")), StatusCode::OK)]
    #[actix_web::test]
    async fn admin_routes_enforce_basic_auth(
        #[case] credentials: Option<(&str, &str)>,
        #[case] expected: StatusCode,
    ) {
        let state = booking_state(
            seeded_store(),
            Arc::new(FixtureReservationNotifier),
            AdminAuth::required("admin", "secret", "Reservas Admin"),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/api/admin/settings");
        if let Some((user, password)) = credentials {
            let encoded = STANDARD.encode(format!("{user}:{password}"));
            req = req.insert_header((AUTHORIZATION, format!("Basic {encoded}")));
        }
        let res = test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), expected);
        if expected == StatusCode::UNAUTHORIZED {
            assert_eq!(
                res.headers()
                    .get(WWW_AUTHENTICATE)
                    .and_then(|v| v.to_str().ok()),
                Some("Basic realm=\"Reservas Admin\", charset=\"UTF-8\"")
            );
        }
    }

    #[actix_web::test]
    async fn public_routes_ignore_admin_auth() {
        let state = booking_state(
            seeded_store(),
            Arc::new(FixtureReservationNotifier),
            AdminAuth::required("admin", "secret", "Reservas Admin"),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/pistas").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
