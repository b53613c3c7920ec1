//! Pure validation of raw booking input.
//!
//! Checks run in a fixed order and the first failure wins:
//! required fields, service, date shape, past date, time shape, duration,
//! derived interval.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use super::{BookingError, BookingPolicy, BookingRules, CustomerContact, ResourceId};
use crate::domain::to_absolute_instant;

/// Booking request as received, before any checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub resource_id: Option<String>,
    pub calendar_date: Option<String>,
    pub local_start_time: Option<String>,
    pub duration_minutes: Option<f64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub service_id: Option<String>,
    pub service_label: Option<String>,
}

/// Normalized booking request with absolute instants resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub resource_id: ResourceId,
    pub calendar_date: NaiveDate,
    pub local_start_time: NaiveTime,
    pub duration_minutes: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub customer: CustomerContact,
    pub service_id: String,
    pub service_label: String,
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, BookingError> {
    trimmed(value).ok_or(BookingError::MissingField { field })
}

/// `pattern` uses `d` for an ASCII digit; any other byte must match exactly.
fn has_shape(value: &str, pattern: &str) -> bool {
    value.len() == pattern.len()
        && value.bytes().zip(pattern.bytes()).all(|(v, p)| match p {
            b'd' => v.is_ascii_digit(),
            other => v == other,
        })
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, BookingError> {
    let invalid = || BookingError::InvalidDateFormat {
        value: value.to_owned(),
    };
    if !has_shape(value, "dddd-dd-dd") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

fn parse_time(value: &str) -> Result<NaiveTime, BookingError> {
    let invalid = || BookingError::InvalidTimeFormat {
        value: value.to_owned(),
    };
    if !has_shape(value, "dd:dd") {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())
}

fn parse_duration(raw: Option<f64>, rules: &BookingRules) -> Result<u32, BookingError> {
    let invalid = || BookingError::invalid_duration(rules);
    let minutes = raw.filter(|m| m.is_finite()).ok_or_else(invalid)?;
    let in_bounds = minutes >= f64::from(rules.min_duration_minutes())
        && minutes <= f64::from(rules.max_duration_minutes());
    if !in_bounds || minutes.fract() != 0.0 {
        return Err(invalid());
    }
    // Bounded by the rule maximum above, so the cast is exact.
    let whole = minutes as u32;
    if rules.accepts(whole) {
        Ok(whole)
    } else {
        Err(invalid())
    }
}

/// Validate `draft` against `policy`, with `today` the facility-local date.
///
/// # Examples
/// ```
/// use booking_backend::domain::{BookingDraft, BookingPolicy, FacilityZone, validate_booking};
/// use chrono::NaiveDate;
///
/// let policy = BookingPolicy::with_zone(FacilityZone::parse("Europe/Madrid").expect("zone"));
/// let today = NaiveDate::from_ymd_opt(2026, 6, 1).expect("date");
/// let draft = BookingDraft {
///     resource_id: Some("PISTA_1".into()),
///     calendar_date: Some("2026-06-02".into()),
///     local_start_time: Some("10:00".into()),
///     duration_minutes: Some(60.0),
///     customer_name: Some("Ana".into()),
///     service_id: Some("corte".into()),
///     ..BookingDraft::default()
/// };
/// let booking = validate_booking(&draft, &policy, today).expect("valid booking");
/// assert_eq!(booking.start.to_rfc3339(), "2026-06-02T08:00:00+00:00");
/// assert_eq!(booking.service_label, "corte");
/// ```
pub fn validate_booking(
    draft: &BookingDraft,
    policy: &BookingPolicy,
    today: NaiveDate,
) -> Result<ValidatedBooking, BookingError> {
    let resource_id = required(draft.resource_id.as_deref(), "resourceId")?;
    let raw_date = required(draft.calendar_date.as_deref(), "calendarDate")?;
    let raw_time = required(draft.local_start_time.as_deref(), "localStartTime")?;
    let customer_name = required(draft.customer_name.as_deref(), "customerName")?;
    let service_id = required(draft.service_id.as_deref(), "serviceId")?;

    let calendar_date = parse_calendar_date(raw_date)?;
    if calendar_date < today {
        return Err(BookingError::DateInPast {
            date: calendar_date,
            today,
        });
    }
    let local_start_time = parse_time(raw_time)?;
    let duration_minutes = parse_duration(draft.duration_minutes, &policy.rules)?;

    let start = to_absolute_instant(calendar_date, local_start_time, policy.zone);
    let end = start + TimeDelta::minutes(i64::from(duration_minutes));
    if end <= start {
        return Err(BookingError::InvalidInterval);
    }

    let service_label = trimmed(draft.service_label.as_deref()).unwrap_or(service_id);

    Ok(ValidatedBooking {
        resource_id: ResourceId::from(resource_id),
        calendar_date,
        local_start_time,
        duration_minutes,
        start,
        end,
        customer: CustomerContact {
            name: customer_name.to_owned(),
            phone: trimmed(draft.customer_phone.as_deref()).map(str::to_owned),
            email: trimmed(draft.customer_email.as_deref()).map(str::to_owned),
        },
        service_id: service_id.to_owned(),
        service_label: service_label.to_owned(),
    })
}
