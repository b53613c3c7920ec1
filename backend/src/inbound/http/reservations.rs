//! Public reservation HTTP handlers.
//!
//! ```text
//! GET  /api/reservas?pistaId&date
//! POST /api/reservas
//! GET  /api/disponibilidad?pistaId&date
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::{debug, warn};

use crate::domain::ports::{ReservationFilter, ReservationNotice};
use crate::domain::{BookingError, Reservation, RequestId, ResourceId, SlotAvailability};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    PublicReservationResponse, ReservationRequest, ReservationResponse, ResourceDateQuery,
    booking_error,
};
use crate::inbound::http::state::HttpState;

impl ResourceDateQuery {
    pub(crate) fn filter(&self) -> ApiResult<ReservationFilter> {
        Ok(ReservationFilter {
            resource_id: self.resource().map(ResourceId::from),
            calendar_date: self.calendar_date()?,
        })
    }
}

/// Reservation timing for the public calendar.
#[get("/reservas")]
pub async fn list_public_reservations(
    state: web::Data<HttpState>,
    query: web::Query<ResourceDateQuery>,
) -> ApiResult<web::Json<Vec<PublicReservationResponse>>> {
    let filter = query.filter()?;
    let reservations = state
        .reservations_query
        .list_reservations(filter)
        .await
        .map_err(booking_error)?;
    Ok(web::Json(
        reservations
            .into_iter()
            .map(PublicReservationResponse::from)
            .collect(),
    ))
}

/// Book a slot. Answers `201` with the stored reservation.
#[post("/reservas")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    payload: web::Json<ReservationRequest>,
) -> ApiResult<HttpResponse> {
    let reservation = state
        .reservations
        .create_reservation(payload.into_inner().into())
        .await
        .map_err(booking_error)?;
    spawn_notice(&state, reservation.clone());
    Ok(HttpResponse::Created().json(ReservationResponse::from(reservation)))
}

/// Tell the admin about a new booking without holding up the response.
/// Failures are logged and never affect the reservation.
fn spawn_notice(state: &HttpState, reservation: Reservation) {
    let settings = state.settings.clone();
    let notifier = state.notifier.clone();
    let task = async move {
        let recipient = match settings.settings().await {
            Ok(settings) => settings.admin_email,
            Err(err) => {
                warn!(error = %err, "cannot read settings for reservation notice");
                return;
            }
        };
        let notice = ReservationNotice {
            reservation,
            recipient,
        };
        match notifier.reservation_created(&notice).await {
            Ok(()) => debug!(reservation_id = %notice.reservation.id, "reservation notice sent"),
            Err(err) => warn!(
                error = %err,
                reservation_id = %notice.reservation.id,
                "reservation notice failed"
            ),
        }
    };
    match RequestId::current() {
        Some(id) => drop(tokio::spawn(RequestId::scope(id, task))),
        None => drop(tokio::spawn(task)),
    }
}

/// Hourly availability of one resource on one local date.
#[get("/disponibilidad")]
pub async fn availability(
    state: web::Data<HttpState>,
    query: web::Query<ResourceDateQuery>,
) -> ApiResult<web::Json<Vec<SlotAvailability>>> {
    let resource = query
        .resource()
        .map(ResourceId::from)
        .ok_or_else(|| booking_error(BookingError::MissingField { field: "resourceId" }))?;
    let date = query
        .calendar_date()?
        .ok_or_else(|| booking_error(BookingError::MissingField { field: "calendarDate" }))?;
    let slots = state
        .reservations_query
        .availability(&resource, date)
        .await
        .map_err(booking_error)?;
    Ok(web::Json(slots))
}
