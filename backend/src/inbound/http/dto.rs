//! Wire shapes for the booking HTTP API.
//!
//! Field names match the JSON the facility's web front end already speaks
//! (`pistaId`, `nombre`, `servicioId`, ...), so the domain names never leak
//! onto the wire and vice versa.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::domain::{
    BookingDraft, BookingError, Error, FacilityZone, Reservation, Resource, Settings,
    SettingsUpdate, parse_calendar_date,
};

/// `durationMin` arrives as a number or a numeric string; anything else is
/// carried as NaN so validation reports it as an invalid duration.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(s)) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// Contact fields arrive as text, but clients sometimes send phone numbers
/// as JSON numbers. Scalars are kept as their textual form.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

/// Body of `POST /api/reservas`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub pista_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    pub servicio_id: Option<String>,
    pub tipo_corte: Option<String>,
}

impl From<ReservationRequest> for BookingDraft {
    fn from(value: ReservationRequest) -> Self {
        Self {
            resource_id: value.pista_id,
            calendar_date: value.date,
            local_start_time: value.start_time,
            duration_minutes: value.duration_min,
            customer_name: value.nombre,
            customer_phone: value.telefono.filter(|v| !v.trim().is_empty()),
            customer_email: value.email.filter(|v| !v.trim().is_empty()),
            service_id: value.servicio_id,
            service_label: value.tipo_corte,
        }
    }
}

/// Wire name for a domain field reported in a validation failure.
fn wire_field(field: &str) -> &str {
    match field {
        "resourceId" => "pistaId",
        "calendarDate" => "date",
        "localStartTime" => "startTime",
        "customerName" => "nombre",
        "serviceId" => "servicioId",
        "name" => "nombre",
        other => other,
    }
}

/// Map a booking failure to the HTTP payload, naming fields as clients
/// sent them.
pub fn booking_error(err: BookingError) -> Error {
    let field = match &err {
        BookingError::MissingField { field } => Some(wire_field(field).to_owned()),
        _ => None,
    };
    let mapped = Error::from(err);
    match (field, mapped.details().cloned()) {
        (Some(field), Some(Value::Object(mut details))) => {
            details.insert("field".to_owned(), Value::String(field));
            mapped.with_details(Value::Object(details))
        }
        _ => mapped,
    }
}

/// Full reservation as seen by administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: String,
    pub pista_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_min: u32,
    pub timezone: String,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub servicio_id: String,
    pub tipo_corte: String,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            id: value.id.to_string(),
            pista_id: value.resource_id.to_string(),
            start: value.start,
            end: value.end,
            date: value.calendar_date,
            start_time: value.local_start_time.format("%H:%M").to_string(),
            duration_min: value.duration_minutes,
            timezone: value.time_zone.name().to_owned(),
            nombre: value.customer.name,
            telefono: value.customer.phone,
            email: value.customer.email,
            servicio_id: value.service_id,
            tipo_corte: value.service_label,
            created_at: value.created_at,
        }
    }
}

/// Reservation timing as shown on the public calendar. Carries no customer
/// contact data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReservationResponse {
    pub id: String,
    pub pista_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_min: u32,
    pub timezone: String,
    pub tipo_corte: String,
}

impl From<Reservation> for PublicReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            id: value.id.to_string(),
            pista_id: value.resource_id.to_string(),
            start: value.start,
            end: value.end,
            date: value.calendar_date,
            start_time: value.local_start_time.format("%H:%M").to_string(),
            duration_min: value.duration_minutes,
            timezone: value.time_zone.name().to_owned(),
            tipo_corte: value.service_label,
        }
    }
}

/// `pistaId`/`date` query used by listings and the availability grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDateQuery {
    pub pista_id: Option<String>,
    pub date: Option<String>,
}

impl ResourceDateQuery {
    /// Parsed `date`, when present.
    pub fn calendar_date(&self) -> Result<Option<NaiveDate>, Error> {
        self.date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| parse_calendar_date(d).map_err(booking_error))
            .transpose()
    }

    /// Non-empty `pistaId`, when present.
    pub fn resource(&self) -> Option<&str> {
        self.pista_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
    pub nombre: String,
    pub descripcion: String,
    pub created_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(value: Resource) -> Self {
        Self {
            id: value.id.to_string(),
            nombre: value.name,
            descripcion: value.description,
            created_at: value.created_at,
        }
    }
}

/// Body of `POST /api/admin/pistas`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

/// Settings as returned to administrators. The SMTP secret is write-only;
/// only its presence is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub admin_email: String,
    pub smtp_pass_set: bool,
}

impl From<Settings> for SettingsResponse {
    fn from(value: Settings) -> Self {
        Self {
            smtp_pass_set: value.has_smtp_secret(),
            admin_email: value.admin_email,
        }
    }
}

/// Body of `PUT /api/admin/settings`; absent fields stay unchanged.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    pub admin_email: Option<String>,
    pub smtp_pass: Option<String>,
}

impl fmt::Debug for SettingsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsRequest")
            .field("admin_email", &self.admin_email)
            .field("smtp_pass", &self.smtp_pass.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl From<SettingsRequest> for SettingsUpdate {
    fn from(value: SettingsRequest) -> Self {
        Self {
            admin_email: value.admin_email,
            smtp_secret: value.smtp_pass,
        }
    }
}

/// Body of `POST /api/admin/reservas/purge`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeBody {
    pub before: Option<String>,
    pub timezone: Option<String>,
}

impl PurgeBody {
    pub fn parse(&self) -> Result<(NaiveDate, Option<FacilityZone>), Error> {
        let before = self
            .before
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| booking_error(BookingError::MissingField { field: "before" }))?;
        let before = parse_calendar_date(before).map_err(booking_error)?;
        let zone = self
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(|z| {
                FacilityZone::parse(z).map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "code": "invalid_time_zone", "value": z }))
                })
            })
            .transpose()?;
        Ok((before, zone))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub removed_count: usize,
}
