//! Facility wall-clock time and its projection onto absolute instants.
//!
//! Bookings are entered as a local calendar date plus `HH:mm` in the
//! facility's zone. Overlap checks run on absolute instants so a booking
//! entered from any client zone lands on the same timeline.
//!
//! Local times that fall into a daylight-saving gap or overlap resolve to
//! whatever the two-pass offset lookup in [`to_absolute_instant`] yields.
//! They are not rejected.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a zone identifier is not in the IANA database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time zone '{0}'")]
pub struct UnknownZoneError(pub String);

/// Validated IANA zone used for facility-local scheduling.
///
/// # Examples
/// ```
/// use booking_backend::domain::FacilityZone;
///
/// let zone = FacilityZone::parse("Europe/Madrid").expect("known zone");
/// assert_eq!(zone.name(), "Europe/Madrid");
/// assert!(FacilityZone::parse("Mars/Olympus").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FacilityZone(Tz);

impl FacilityZone {
    /// Parse an IANA identifier such as `Europe/Madrid`.
    pub fn parse(id: &str) -> Result<Self, UnknownZoneError> {
        id.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| UnknownZoneError(id.to_owned()))
    }

    #[must_use]
    pub fn tz(self) -> Tz {
        self.0
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }
}

impl From<Tz> for FacilityZone {
    fn from(value: Tz) -> Self {
        Self(value)
    }
}

impl FromStr for FacilityZone {
    type Err = UnknownZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FacilityZone {
    type Error = UnknownZoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FacilityZone> for String {
    fn from(value: FacilityZone) -> Self {
        value.name().to_owned()
    }
}

impl fmt::Display for FacilityZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Local calendar date and wall-clock time in some zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDateTime {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

fn offset_seconds_at(zone: Tz, instant: &NaiveDateTime) -> i64 {
    i64::from(zone.offset_from_utc_datetime(instant).fix().local_minus_utc())
}

/// Convert a local date and time in `zone` to an absolute instant.
///
/// The local fields are first read as if they were UTC. The zone offset at
/// that naive instant is subtracted, then the offset is looked up again at the
/// resulting candidate. When the two lookups disagree the conversion is redone
/// once with the second offset. This makes the result deterministic for gap
/// and overlap times without rejecting them.
///
/// # Examples
/// ```
/// use booking_backend::domain::{FacilityZone, to_absolute_instant};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let zone = FacilityZone::parse("Europe/Madrid").expect("zone");
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("date");
/// let time = NaiveTime::from_hms_opt(10, 0, 0).expect("time");
/// let instant = to_absolute_instant(date, time, zone);
/// assert_eq!(instant.to_rfc3339(), "2026-01-15T09:00:00+00:00");
/// ```
#[must_use]
pub fn to_absolute_instant(date: NaiveDate, time: NaiveTime, zone: FacilityZone) -> DateTime<Utc> {
    let tz = zone.tz();
    let naive = date.and_time(time);
    let first = offset_seconds_at(tz, &naive);
    let candidate = naive - TimeDelta::seconds(first);
    let second = offset_seconds_at(tz, &candidate);
    let resolved = if second == first {
        candidate
    } else {
        naive - TimeDelta::seconds(second)
    };
    Utc.from_utc_datetime(&resolved)
}

/// Project an absolute instant back onto the facility's wall clock.
#[must_use]
pub fn local_projection(instant: DateTime<Utc>, zone: FacilityZone) -> LocalDateTime {
    let local = instant.with_timezone(&zone.tz());
    LocalDateTime {
        date: local.date_naive(),
        time: local.time(),
    }
}

/// Calendar date in `zone` at the clock's current instant.
#[must_use]
pub fn current_local_date(clock: &dyn Clock, zone: FacilityZone) -> NaiveDate {
    clock.utc().with_timezone(&zone.tz()).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MutableClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn madrid() -> FacilityZone {
        FacilityZone::parse("Europe/Madrid").expect("known zone")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[rstest]
    #[case(date(2026, 1, 15), time(10, 0), "2026-01-15T09:00:00+00:00")]
    #[case(date(2026, 7, 15), time(10, 0), "2026-07-15T08:00:00+00:00")]
    #[case(date(2026, 3, 29), time(12, 0), "2026-03-29T10:00:00+00:00")]
    #[case(date(2026, 10, 25), time(12, 0), "2026-10-25T11:00:00+00:00")]
    #[case(date(2026, 1, 1), time(0, 30), "2025-12-31T23:30:00+00:00")]
    fn converts_local_wall_clock(
        madrid: FacilityZone,
        #[case] day: NaiveDate,
        #[case] at: NaiveTime,
        #[case] expected: &str,
    ) {
        assert_eq!(to_absolute_instant(day, at, madrid).to_rfc3339(), expected);
    }

    #[rstest]
    #[case(date(2026, 6, 3), time(18, 45))]
    #[case(date(2026, 3, 29), time(10, 0))]
    #[case(date(2026, 10, 25), time(10, 0))]
    fn round_trips_through_projection(
        madrid: FacilityZone,
        #[case] day: NaiveDate,
        #[case] at: NaiveTime,
    ) {
        let instant = to_absolute_instant(day, at, madrid);
        let local = local_projection(instant, madrid);
        assert_eq!(local, LocalDateTime { date: day, time: at });
    }

    #[rstest]
    fn gap_time_resolves_deterministically(madrid: FacilityZone) {
        // 02:30 does not exist on 2026-03-29 in Madrid.
        let instant = to_absolute_instant(date(2026, 3, 29), time(2, 30), madrid);
        assert_eq!(instant.to_rfc3339(), "2026-03-29T01:30:00+00:00");
    }

    #[rstest]
    fn overlap_time_resolves_deterministically(madrid: FacilityZone) {
        // 02:30 occurs twice on 2026-10-25 in Madrid.
        let instant = to_absolute_instant(date(2026, 10, 25), time(2, 30), madrid);
        assert_eq!(instant.to_rfc3339(), "2026-10-25T01:30:00+00:00");
    }

    #[rstest]
    fn current_local_date_uses_zone_not_utc(madrid: FacilityZone) {
        let clock = MutableClock::at_utc(2026, 5, 31, 22);
        assert_eq!(current_local_date(&clock, madrid), date(2026, 6, 1));
    }

    #[rstest]
    fn zone_serialises_as_identifier(madrid: FacilityZone) {
        let json = serde_json::to_string(&madrid).expect("serialise");
        assert_eq!(json, "\"Europe/Madrid\"");
        let parsed: FacilityZone = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(parsed, madrid);
        assert!(serde_json::from_str::<FacilityZone>("\"Nowhere/Else\"").is_err());
    }
}
