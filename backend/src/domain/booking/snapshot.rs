//! In-memory view of the whole booking document.
//!
//! Stores load and save the document as one unit. Services mutate a loaded
//! snapshot through these helpers and then write it back.

use chrono::NaiveDate;

use super::{Reservation, ReservationId, Resource, ResourceId, Settings};
use crate::domain::{FacilityZone, local_projection};

/// Resources, reservations and settings as persisted together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSnapshot {
    pub resources: Vec<Resource>,
    pub reservations: Vec<Reservation>,
    pub settings: Settings,
}

impl BookingSnapshot {
    #[must_use]
    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    pub fn insert_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Remove a resource and every reservation that references it.
    ///
    /// Returns the number of reservations removed, or `None` when the
    /// resource does not exist.
    pub fn remove_resource(&mut self, id: &ResourceId) -> Option<usize> {
        let before = self.resources.len();
        self.resources.retain(|r| &r.id != id);
        if self.resources.len() == before {
            return None;
        }
        let reservations_before = self.reservations.len();
        self.reservations.retain(|r| &r.resource_id != id);
        Some(reservations_before - self.reservations.len())
    }

    #[must_use]
    pub fn reservation(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| &r.id == id)
    }

    /// Reservations held on one resource.
    pub fn reservations_for<'a>(
        &'a self,
        resource_id: &'a ResourceId,
    ) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.reservations
            .iter()
            .filter(move |r| &r.resource_id == resource_id)
    }

    pub fn insert_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    /// Returns `false` when no reservation carried `id`.
    pub fn remove_reservation(&mut self, id: &ReservationId) -> bool {
        let before = self.reservations.len();
        self.reservations.retain(|r| &r.id != id);
        self.reservations.len() != before
    }

    /// Drop reservations whose start falls on a local date before `cutoff`
    /// in `zone`. Returns how many were removed.
    pub fn remove_reservations_before(&mut self, cutoff: NaiveDate, zone: FacilityZone) -> usize {
        let before = self.reservations.len();
        self.reservations
            .retain(|r| local_projection(r.start, zone).date >= cutoff);
        before - self.reservations.len()
    }
}
