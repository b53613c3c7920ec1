//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_store;
mod reservation_command;
mod reservation_notifier;
mod reservation_query;
mod resource_command;
mod settings_command;

#[cfg(test)]
pub use booking_store::MockBookingStore;
pub use booking_store::{BookingStore, BookingStoreError};
#[cfg(test)]
pub use reservation_command::MockReservationCommand;
pub use reservation_command::{PurgeRequest, ReservationCommand};
#[cfg(test)]
pub use reservation_notifier::MockReservationNotifier;
pub use reservation_notifier::{
    FixtureReservationNotifier, NotifierError, ReservationNotice, ReservationNotifier,
};
#[cfg(test)]
pub use reservation_query::MockReservationQuery;
pub use reservation_query::{ReservationFilter, ReservationQuery};
#[cfg(test)]
pub use resource_command::MockResourceCommand;
pub use resource_command::{NewResource, ResourceCommand};
#[cfg(test)]
pub use settings_command::MockSettingsCommand;
pub use settings_command::SettingsCommand;
