//! Scheduling core.
//!
//! Purpose: turn facility-local booking requests into conflict-free
//! reservations. Everything here is transport agnostic; adapters reach the
//! core through the traits in [`ports`].
//!
//! Public surface:
//! - `FacilityZone`, `to_absolute_instant`, `local_projection`,
//!   `current_local_date`: wall-clock conversion.
//! - `validate_booking`: first-failure validation of raw input.
//! - `find_overlaps`: half-open conflict detection.
//! - `WriteSerializer`: FIFO exclusion for document writes.
//! - `BookingService`: the orchestrator implementing the driving ports.

pub mod booking;
mod booking_service;
mod conflict;
pub mod error;
pub mod ports;
mod request_id;
mod slots;
mod write_serializer;
mod zone_time;

pub use self::booking::{
    BookingDraft, BookingError, BookingPolicy, BookingRules, BookingSnapshot, CustomerContact,
    OpeningHours, PolicyError, Reservation, ReservationId, ReservedWindow, Resource, ResourceId,
    Settings, SettingsUpdate, ValidatedBooking, parse_calendar_date, validate_booking,
};
pub use self::booking_service::BookingService;
pub use self::conflict::{CandidateInterval, find_overlaps, find_overlaps_prefiltered};
pub use self::error::{Error, ErrorCode};
pub use self::request_id::{REQUEST_ID_HEADER, RequestId};
pub use self::slots::{SlotAvailability, slot_grid};
pub use self::write_serializer::{SerializerError, WriteSerializer};
pub use self::zone_time::{
    FacilityZone, LocalDateTime, UnknownZoneError, current_local_date, local_projection,
    to_absolute_instant,
};
