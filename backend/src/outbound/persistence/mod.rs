//! Booking store adapters.
//!
//! - [`JsonFileBookingStore`]: the production store, one JSON document on
//!   disk replaced atomically on every save.
//! - [`InMemoryBookingStore`]: process-local store for tests and
//!   throwaway runs.
//!
//! Adapters only translate between stored shapes and domain types. The
//! domain owns validation and write serialization.

mod atomic_write;
mod document;
mod json_file_store;
mod memory_store;

pub use json_file_store::JsonFileBookingStore;
pub use memory_store::InMemoryBookingStore;
