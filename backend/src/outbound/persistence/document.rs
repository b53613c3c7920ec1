//! On-disk shape of the booking document.
//!
//! Field names follow the existing `db.json` files so stores written by
//! earlier deployments load unchanged. Reservation records written before
//! local date, time, duration and zone were stored are completed from their
//! `start`/`end` instants in the facility zone.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    BookingSnapshot, CustomerContact, FacilityZone, Reservation, ReservationId, Resource,
    ResourceId, Settings, local_projection,
};

mod hh_mm {
    //! `HH:mm` wall-clock times.

    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.collect_str(&time.format("%H:%M")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| NaiveTime::parse_from_str(&raw, "%H:%M").map_err(D::Error::custom))
            .transpose()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub admin_email: String,
    #[serde(default)]
    pub smtp_pass: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredResource {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredReservation {
    pub id: String,
    pub pista_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub servicio_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_corte: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hh_mm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Whole persisted document. Top-level keys this service does not manage
/// (such as `usuarios`) are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct StoredDocument {
    #[serde(default)]
    pub meta: StoredMeta,
    #[serde(default)]
    pub pistas: Vec<StoredResource>,
    #[serde(default)]
    pub reservas: Vec<StoredReservation>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl StoredReservation {
    fn into_domain(self, facility_zone: FacilityZone) -> Reservation {
        let zone = self
            .timezone
            .as_deref()
            .and_then(|id| FacilityZone::parse(id).ok())
            .unwrap_or(facility_zone);
        let local = local_projection(self.start, zone);
        let duration_minutes = self.duration_min.unwrap_or_else(|| {
            u32::try_from((self.end - self.start).num_minutes()).unwrap_or_default()
        });
        let service_label = self
            .tipo_corte
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| self.servicio_id.clone());
        Reservation {
            id: ReservationId::from(self.id),
            resource_id: ResourceId::from(self.pista_id),
            calendar_date: self.date.unwrap_or(local.date),
            local_start_time: self.start_time.unwrap_or(local.time),
            duration_minutes,
            start: self.start,
            end: self.end,
            customer: CustomerContact {
                name: self.nombre,
                phone: self.telefono,
                email: self.email,
            },
            service_id: self.servicio_id,
            service_label,
            time_zone: zone,
            created_at: self.created_at,
        }
    }
}

impl From<&Reservation> for StoredReservation {
    fn from(value: &Reservation) -> Self {
        Self {
            id: value.id.to_string(),
            pista_id: value.resource_id.to_string(),
            start: value.start,
            end: value.end,
            nombre: value.customer.name.clone(),
            telefono: value.customer.phone.clone(),
            email: value.customer.email.clone(),
            servicio_id: value.service_id.clone(),
            tipo_corte: Some(value.service_label.clone()),
            date: Some(value.calendar_date),
            start_time: Some(value.local_start_time),
            duration_min: Some(value.duration_minutes),
            timezone: Some(value.time_zone.name().to_owned()),
            created_at: value.created_at,
        }
    }
}

impl StoredDocument {
    /// Decode into a domain snapshot, completing legacy records.
    pub fn into_snapshot(self, facility_zone: FacilityZone) -> BookingSnapshot {
        BookingSnapshot {
            resources: self
                .pistas
                .into_iter()
                .map(|p| Resource {
                    id: ResourceId::from(p.id),
                    name: p.nombre,
                    description: p.descripcion,
                    created_at: p.created_at,
                })
                .collect(),
            reservations: self
                .reservas
                .into_iter()
                .map(|r| r.into_domain(facility_zone))
                .collect(),
            settings: Settings {
                admin_email: self.meta.admin_email,
                smtp_secret: self.meta.smtp_pass,
            },
        }
    }

    /// Encode a snapshot over `previous`, keeping its creation stamp and
    /// unmanaged keys.
    pub fn from_snapshot(
        snapshot: &BookingSnapshot,
        facility_zone: FacilityZone,
        previous: Option<StoredDocument>,
        now: DateTime<Utc>,
    ) -> Self {
        let (created_at, other) = previous
            .map(|doc| (doc.meta.created_at, doc.other))
            .unwrap_or_default();
        Self {
            meta: StoredMeta {
                timezone: Some(facility_zone.name().to_owned()),
                created_at: Some(created_at.unwrap_or(now)),
                admin_email: snapshot.settings.admin_email.clone(),
                smtp_pass: snapshot.settings.smtp_secret.clone(),
            },
            pistas: snapshot
                .resources
                .iter()
                .map(|r| StoredResource {
                    id: r.id.to_string(),
                    nombre: r.name.clone(),
                    descripcion: r.description.clone(),
                    created_at: r.created_at,
                })
                .collect(),
            reservas: snapshot
                .reservations
                .iter()
                .map(StoredReservation::from)
                .collect(),
            other,
        }
    }
}
