//! Driving port for reservation mutations.
//!
//! Implementations serialize every write against the booking document so two
//! overlapping requests can never both be accepted.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{BookingDraft, BookingError, FacilityZone, Reservation, ReservationId};

/// Sweep of reservations that start before a local calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeRequest {
    /// Reservations whose local start date is strictly before this are removed.
    pub before: NaiveDate,
    /// Zone in which start dates are read; the facility zone when `None`.
    pub zone: Option<FacilityZone>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Validate and book a slot.
    async fn create_reservation(&self, draft: BookingDraft) -> Result<Reservation, BookingError>;

    /// Remove a reservation. `Ok(false)` when it did not exist.
    async fn delete_reservation(&self, id: &ReservationId) -> Result<bool, BookingError>;

    /// Remove reservations before a cutoff date, returning how many went.
    async fn delete_reservations_before(
        &self,
        request: PurgeRequest,
    ) -> Result<usize, BookingError>;
}
