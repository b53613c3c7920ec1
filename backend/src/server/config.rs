//! Process configuration loaded via OrthoConfig.
//!
//! Every value can be supplied as a CLI flag or a `BOOKING_*` environment
//! variable. Unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;

use booking_backend::domain::booking::{
    DEFAULT_CLOSING_HOUR, DEFAULT_MAX_DURATION_MINUTES, DEFAULT_MIN_DURATION_MINUTES,
    DEFAULT_OPENING_HOUR, DEFAULT_STEP_MINUTES,
};
use booking_backend::domain::{
    BookingPolicy, BookingRules, FacilityZone, OpeningHours, PolicyError, UnknownZoneError,
};
use booking_backend::inbound::http::admin_auth::AdminAuth;
use booking_backend::inbound::http::state::StatusInfo;
use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_PATH: &str = "data/db.json";
const DEFAULT_TIMEZONE: &str = "Europe/Madrid";
const DEFAULT_ADMIN_REALM: &str = "Reservas Admin";
const DEFAULT_ENVIRONMENT: &str = "development";
const PRODUCTION: &str = "production";

/// Configuration rejected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {address}:{port}")]
    BindAddress { address: String, port: u16 },
    #[error("data path {0} is not valid UTF-8")]
    DataPath(String),
    #[error(transparent)]
    Zone(#[from] UnknownZoneError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Settings controlling the booking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKING")]
pub struct AppSettings {
    /// Interface to listen on.
    pub bind_address: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Location of the JSON booking document.
    pub data_path: Option<PathBuf>,
    /// IANA zone the facility's wall clock runs in.
    pub timezone: Option<String>,
    pub min_duration_minutes: Option<u32>,
    pub max_duration_minutes: Option<u32>,
    pub step_minutes: Option<u32>,
    /// First hour shown in the availability grid.
    pub opening_hour: Option<u32>,
    /// Hour at which the availability grid stops.
    pub closing_hour: Option<u32>,
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,
    pub admin_realm: Option<String>,
    /// Deployment name; `production` enables admin authentication.
    pub environment: Option<String>,
    /// Enforce admin authentication outside production.
    #[ortho_config(default = false)]
    pub force_admin_auth: bool,
    /// Seed demo courts into an empty store on startup.
    #[ortho_config(default = false)]
    pub seed_demo: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        format!("{address}:{port}")
            .parse()
            .map_err(|_| ConfigError::BindAddress {
                address: address.to_owned(),
                port,
            })
    }

    pub fn data_path(&self) -> Result<Utf8PathBuf, ConfigError> {
        let path = self
            .data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        Utf8PathBuf::from_path_buf(path)
            .map_err(|path| ConfigError::DataPath(path.display().to_string()))
    }

    pub fn facility_zone(&self) -> Result<FacilityZone, ConfigError> {
        Ok(FacilityZone::parse(
            self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE),
        )?)
    }

    /// Validated scheduling policy.
    pub fn booking_policy(&self) -> Result<BookingPolicy, ConfigError> {
        let rules = BookingRules::new(
            self.min_duration_minutes
                .unwrap_or(DEFAULT_MIN_DURATION_MINUTES),
            self.max_duration_minutes
                .unwrap_or(DEFAULT_MAX_DURATION_MINUTES),
            self.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES),
        )?;
        let opening_hours = OpeningHours::new(
            self.opening_hour.unwrap_or(DEFAULT_OPENING_HOUR),
            self.closing_hour.unwrap_or(DEFAULT_CLOSING_HOUR),
        )?;
        Ok(BookingPolicy {
            zone: self.facility_zone()?,
            rules,
            opening_hours,
        })
    }

    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    pub fn is_production(&self) -> bool {
        self.environment() == PRODUCTION
    }

    pub fn admin_auth(&self) -> AdminAuth {
        AdminAuth::from_deployment(
            self.admin_user.as_deref().unwrap_or_default(),
            self.admin_pass.as_deref().unwrap_or_default(),
            self.admin_realm.as_deref().unwrap_or(DEFAULT_ADMIN_REALM),
            self.is_production(),
            self.force_admin_auth,
        )
    }

    pub fn status_info(&self) -> Result<StatusInfo, ConfigError> {
        Ok(StatusInfo {
            environment: self.environment().to_owned(),
            zone: self.facility_zone()?,
        })
    }
}
