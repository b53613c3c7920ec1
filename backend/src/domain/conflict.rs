//! Overlap detection between a requested interval and stored reservations.
//!
//! Intervals are half-open, so a booking ending at 10:00 and another starting
//! at 10:00 do not collide. Only reservations on the same resource count.

use chrono::{DateTime, NaiveDate, Utc};

use super::{FacilityZone, Reservation, ResourceId};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Requested interval on a resource, with the local date it was entered for.
#[derive(Debug, Clone, Copy)]
pub struct CandidateInterval<'a> {
    pub resource_id: &'a ResourceId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub calendar_date: NaiveDate,
    pub duration_minutes: u32,
    pub time_zone: FacilityZone,
}

/// Reservations on `resource_id` whose interval overlaps `[start, end)`.
///
/// # Examples
/// ```
/// use booking_backend::domain::{ResourceId, find_overlaps};
/// use chrono::{TimeZone, Utc};
///
/// let court = ResourceId::from("PISTA_1");
/// let start = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).single().expect("start");
/// let end = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).single().expect("end");
/// assert!(find_overlaps(&court, start, end, &[]).is_empty());
/// ```
#[must_use]
pub fn find_overlaps<'a>(
    resource_id: &ResourceId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &'a [Reservation],
) -> Vec<&'a Reservation> {
    existing
        .iter()
        .filter(|r| &r.resource_id == resource_id && r.overlaps(start, end))
        .collect()
}

/// Whether the local dates alone leave room for an overlap.
///
/// Two intervals that overlap start less than the longer duration apart, so
/// their local dates in a shared zone differ by at most that many whole days
/// plus one for the offset shift. Reservations recorded in another zone are
/// never skipped.
fn may_overlap_by_date(candidate: &CandidateInterval<'_>, reservation: &Reservation) -> bool {
    if reservation.time_zone != candidate.time_zone {
        return true;
    }
    let longest = candidate.duration_minutes.max(reservation.duration_minutes);
    let window_days = i64::from(longest.div_ceil(MINUTES_PER_DAY)) + 1;
    (candidate.calendar_date - reservation.calendar_date)
        .num_days()
        .abs()
        <= window_days
}

/// Same result as [`find_overlaps`], skipping reservations whose calendar
/// date is too far from the candidate's to matter.
#[must_use]
pub fn find_overlaps_prefiltered<'a>(
    candidate: &CandidateInterval<'_>,
    existing: &'a [Reservation],
) -> Vec<&'a Reservation> {
    existing
        .iter()
        .filter(|r| &r.resource_id == candidate.resource_id)
        .filter(|r| may_overlap_by_date(candidate, r))
        .filter(|r| r.overlaps(candidate.start, candidate.end))
        .collect()
}
