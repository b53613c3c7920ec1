//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::FacilityZone;
use crate::domain::ports::{
    ReservationCommand, ReservationNotifier, ReservationQuery, ResourceCommand, SettingsCommand,
};

use super::admin_auth::AdminAuth;

/// Port implementations handed to the HTTP adapter.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservations_query: Arc<dyn ReservationQuery>,
    pub resources: Arc<dyn ResourceCommand>,
    pub settings: Arc<dyn SettingsCommand>,
    pub notifier: Arc<dyn ReservationNotifier>,
}

/// Values reported by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub environment: String,
    pub zone: FacilityZone,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservations_query: Arc<dyn ReservationQuery>,
    pub resources: Arc<dyn ResourceCommand>,
    pub settings: Arc<dyn SettingsCommand>,
    pub notifier: Arc<dyn ReservationNotifier>,
    pub admin_auth: AdminAuth,
    pub status: StatusInfo,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, admin_auth: AdminAuth, status: StatusInfo) -> Self {
        let HttpStatePorts {
            reservations,
            reservations_query,
            resources,
            settings,
            notifier,
        } = ports;
        Self {
            reservations,
            reservations_query,
            resources,
            settings,
            notifier,
            admin_auth,
            status,
        }
    }
}
