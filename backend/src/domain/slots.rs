//! Hourly availability grid for a resource on one local date.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use super::{BookingPolicy, Reservation, to_absolute_instant};

/// One hour-long display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    #[serde(serialize_with = "serialize_hh_mm")]
    pub local_start: NaiveTime,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available: bool,
}

fn serialize_hh_mm<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&time.format("%H:%M"))
}

/// Slots from opening to closing hour, each marked unavailable when any of
/// `reservations` overlaps it. Callers pass reservations of one resource.
#[must_use]
pub fn slot_grid<'a>(
    calendar_date: NaiveDate,
    policy: &BookingPolicy,
    reservations: impl IntoIterator<Item = &'a Reservation>,
) -> Vec<SlotAvailability> {
    let booked: Vec<&Reservation> = reservations.into_iter().collect();
    policy
        .opening_hours
        .slot_starts()
        .map(|local_start| {
            let start = to_absolute_instant(calendar_date, local_start, policy.zone);
            let end = start + TimeDelta::hours(1);
            SlotAvailability {
                local_start,
                start,
                end,
                available: !booked.iter().any(|r| r.overlaps(start, end)),
            }
        })
        .collect()
}
