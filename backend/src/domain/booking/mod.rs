//! Booking aggregate: resources, reservations and the shared settings record.
//!
//! Identifiers are opaque strings. Newly minted ids carry a readable prefix
//! (`PISTA_`, `RES_`) followed by a random UUID so stored documents stay easy
//! to scan by eye.

mod error;
mod rules;
mod snapshot;
mod validation;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::{BookingError, ReservedWindow};
pub use rules::{
    BookingPolicy, BookingRules, DEFAULT_CLOSING_HOUR, DEFAULT_MAX_DURATION_MINUTES,
    DEFAULT_MIN_DURATION_MINUTES, DEFAULT_OPENING_HOUR, DEFAULT_STEP_MINUTES, OpeningHours,
    PolicyError,
};
pub use snapshot::BookingSnapshot;
pub use validation::{BookingDraft, ValidatedBooking, parse_calendar_date, validate_booking};

use super::FacilityZone;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(format!(concat!($prefix, "{}"), Uuid::new_v4().simple()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a bookable resource (a court, a chair, a room).
    ResourceId,
    "PISTA_"
);

opaque_id!(
    /// Identifier of a reservation.
    ReservationId,
    "RES_"
);

/// A bookable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Customer details captured with a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A confirmed booking of one resource over a half-open interval.
///
/// `end` is exclusive and always equals `start + duration_minutes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub resource_id: ResourceId,
    pub calendar_date: NaiveDate,
    pub local_start_time: NaiveTime,
    pub duration_minutes: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub customer: CustomerContact,
    pub service_id: String,
    pub service_label: String,
    pub time_zone: FacilityZone,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Build a reservation from validated input.
    #[must_use]
    pub fn from_validated(
        booking: ValidatedBooking,
        time_zone: FacilityZone,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReservationId::random(),
            resource_id: booking.resource_id,
            calendar_date: booking.calendar_date,
            local_start_time: booking.local_start_time,
            duration_minutes: booking.duration_minutes,
            start: booking.start,
            end: booking.end,
            customer: booking.customer,
            service_id: booking.service_id,
            service_label: booking.service_label,
            time_zone,
            created_at,
        }
    }

    /// Half-open overlap with `[start, end)`.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Admin notification settings. A single record per deployment.
///
/// `Debug` output never includes the SMTP secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub admin_email: String,
    pub smtp_secret: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("admin_email", &self.admin_email)
            .field("smtp_secret_set", &self.has_smtp_secret())
            .finish()
    }
}

/// Partial update applied to [`Settings`]; `None` leaves a field untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub admin_email: Option<String>,
    pub smtp_secret: Option<String>,
}

impl fmt::Debug for SettingsUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsUpdate")
            .field("admin_email", &self.admin_email)
            .field("smtp_secret", &self.smtp_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Whether an SMTP secret has been stored.
    #[must_use]
    pub fn has_smtp_secret(&self) -> bool {
        !self.smtp_secret.is_empty()
    }

    /// Apply an update, trimming the email address.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(email) = update.admin_email {
            self.admin_email = email.trim().to_owned();
        }
        if let Some(secret) = update.smtp_secret {
            self.smtp_secret = secret;
        }
    }
}
