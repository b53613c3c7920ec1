//! Port for loading and saving the whole booking document.
//!
//! Adapters persist resources, reservations and settings as one unit. The
//! domain serializes every `load`-mutate-`save` cycle, so adapters need not
//! guard against concurrent writers themselves.

use async_trait::async_trait;

use crate::domain::BookingSnapshot;

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking store adapters.
    pub enum BookingStoreError {
        /// The backing medium could not be read or written.
        Unavailable { message: String } =>
            "booking store unavailable: {message}",
        /// Stored data could not be decoded.
        Corrupt { message: String } =>
            "booking store document is corrupt: {message}",
    }
}

/// Whole-document persistence for booking state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Read the current document. A store with nothing saved yet returns an
    /// empty snapshot.
    async fn load(&self) -> Result<BookingSnapshot, BookingStoreError>;

    /// Replace the stored document.
    async fn save(&self, snapshot: &BookingSnapshot) -> Result<(), BookingStoreError>;
}
