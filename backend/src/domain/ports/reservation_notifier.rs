//! Port for telling the facility about new reservations.
//!
//! Notification runs after a booking is committed and outside the write
//! critical section. Failures are logged by the caller and never undo the
//! booking.

use async_trait::async_trait;

use crate::domain::Reservation;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notifier adapters.
    pub enum NotifierError {
        /// No recipient is configured.
        NoRecipient => "no notification recipient configured",
        /// Delivery failed.
        Delivery { message: String } => "notification delivery failed: {message}",
    }
}

/// A committed reservation and who should hear about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationNotice {
    pub reservation: Reservation,
    /// Admin address from settings; empty when unset.
    pub recipient: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    async fn reservation_created(&self, notice: &ReservationNotice) -> Result<(), NotifierError>;
}

/// Notifier that accepts and drops every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReservationNotifier;

#[async_trait]
impl ReservationNotifier for FixtureReservationNotifier {
    async fn reservation_created(&self, _notice: &ReservationNotice) -> Result<(), NotifierError> {
        Ok(())
    }
}
