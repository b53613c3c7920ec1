//! Driving port for reservation reads and slot availability.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{BookingError, Reservation, ResourceId, SlotAvailability};

/// Optional narrowing of a reservation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub resource_id: Option<ResourceId>,
    /// Facility-local calendar date.
    pub calendar_date: Option<NaiveDate>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    /// Reservations matching `filter`, ordered by start instant.
    async fn list_reservations(
        &self,
        filter: ReservationFilter,
    ) -> Result<Vec<Reservation>, BookingError>;

    /// Hourly grid for one resource on one facility-local date.
    async fn availability(
        &self,
        resource_id: &ResourceId,
        calendar_date: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, BookingError>;
}
