//! Reservation command and query use-cases.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

use super::{BookingService, Write};
use crate::domain::ports::{
    BookingStore, PurgeRequest, ReservationCommand, ReservationFilter, ReservationQuery,
};
use crate::domain::{
    BookingDraft, BookingError, CandidateInterval, Reservation, ReservationId, ReservedWindow,
    ResourceId, SlotAvailability, current_local_date, find_overlaps_prefiltered, slot_grid,
    validate_booking,
};

#[async_trait]
impl<S> ReservationCommand for BookingService<S>
where
    S: BookingStore + 'static,
{
    async fn create_reservation(&self, draft: BookingDraft) -> Result<Reservation, BookingError> {
        let zone = self.policy.zone;
        let today = current_local_date(self.clock.as_ref(), zone);
        let booking = validate_booking(&draft, &self.policy, today)?;
        let created_at = self.clock.utc();

        let reservation = self
            .mutate(move |snapshot| {
                if snapshot.resource(&booking.resource_id).is_none() {
                    return Err(BookingError::InvalidResource {
                        id: booking.resource_id.to_string(),
                    });
                }
                let candidate = CandidateInterval {
                    resource_id: &booking.resource_id,
                    start: booking.start,
                    end: booking.end,
                    calendar_date: booking.calendar_date,
                    duration_minutes: booking.duration_minutes,
                    time_zone: zone,
                };
                let collision = find_overlaps_prefiltered(&candidate, &snapshot.reservations)
                    .first()
                    .map(|existing| ReservedWindow {
                        start: existing.start,
                        end: existing.end,
                    });
                if let Some(window) = collision {
                    debug!(
                        resource_id = %booking.resource_id,
                        start = %booking.start,
                        "booking rejected by overlap"
                    );
                    return Err(BookingError::Conflict { window });
                }
                let reservation = Reservation::from_validated(booking, zone, created_at);
                snapshot.insert_reservation(reservation.clone());
                Ok(Write::Persist(reservation))
            })
            .await?;

        info!(
            reservation_id = %reservation.id,
            resource_id = %reservation.resource_id,
            start = %reservation.start,
            duration_minutes = reservation.duration_minutes,
            "reservation created"
        );
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: &ReservationId) -> Result<bool, BookingError> {
        let target = id.clone();
        let removed = self
            .mutate(move |snapshot| {
                if snapshot.remove_reservation(&target) {
                    Ok(Write::Persist(true))
                } else {
                    Ok(Write::Skip(false))
                }
            })
            .await?;
        if removed {
            info!(reservation_id = %id, "reservation deleted");
        }
        Ok(removed)
    }

    async fn delete_reservations_before(
        &self,
        request: PurgeRequest,
    ) -> Result<usize, BookingError> {
        let zone = request.zone.unwrap_or(self.policy.zone);
        let removed = self
            .mutate(move |snapshot| {
                let removed = snapshot.remove_reservations_before(request.before, zone);
                Ok(if removed > 0 {
                    Write::Persist(removed)
                } else {
                    Write::Skip(0)
                })
            })
            .await?;
        info!(before = %request.before, zone = %zone, removed, "reservations purged");
        Ok(removed)
    }
}

#[async_trait]
impl<S> ReservationQuery for BookingService<S>
where
    S: BookingStore + 'static,
{
    async fn list_reservations(
        &self,
        filter: ReservationFilter,
    ) -> Result<Vec<Reservation>, BookingError> {
        let snapshot = self.load().await?;
        let mut matching: Vec<Reservation> = snapshot
            .reservations
            .into_iter()
            .filter(|r| {
                filter
                    .resource_id
                    .as_ref()
                    .is_none_or(|id| &r.resource_id == id)
            })
            .filter(|r| filter.calendar_date.is_none_or(|date| r.calendar_date == date))
            .collect();
        matching.sort_by_key(|r| r.start);
        Ok(matching)
    }

    async fn availability(
        &self,
        resource_id: &ResourceId,
        calendar_date: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, BookingError> {
        let snapshot = self.load().await?;
        if snapshot.resource(resource_id).is_none() {
            return Err(BookingError::InvalidResource {
                id: resource_id.to_string(),
            });
        }
        Ok(slot_grid(
            calendar_date,
            &self.policy,
            snapshot.reservations_for(resource_id),
        ))
    }
}
