//! Reservation notifier adapters.

mod log_notifier;

pub use log_notifier::LogReservationNotifier;
