//! Optional demo data applied at startup.
//!
//! Seeds two courts and an admin address into an empty deployment so a
//! fresh install has something to book. A store that already holds
//! resources is left alone.

use thiserror::Error;
use tracing::info;

use crate::domain::BookingError;
use crate::domain::ports::{NewResource, ResourceCommand, SettingsCommand};
use crate::domain::SettingsUpdate;

const DEMO_RESOURCES: [(&str, &str); 2] = [
    ("Pista Futbol Sala", "Pabellon principal"),
    ("Pista Padel 1", "Exterior"),
];
const DEMO_ADMIN_EMAIL: &str = "admin@demo.local";

#[derive(Debug, Error)]
#[error("demo data seeding failed: {0}")]
pub struct DemoSeedError(#[from] BookingError);

/// What seeding did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSeedOutcome {
    Applied { resources: usize },
    AlreadyPopulated,
}

/// Seed demo data when `enabled` and the store has no resources yet.
/// Returns `None` when disabled.
pub async fn seed_demo_data(
    enabled: bool,
    resources: &dyn ResourceCommand,
    settings: &dyn SettingsCommand,
) -> Result<Option<DemoSeedOutcome>, DemoSeedError> {
    if !enabled {
        info!(reason = "disabled", "demo data seeding skipped");
        return Ok(None);
    }
    if !resources.list_resources().await?.is_empty() {
        info!("store already holds resources; demo data skipped");
        return Ok(Some(DemoSeedOutcome::AlreadyPopulated));
    }

    for (name, description) in DEMO_RESOURCES {
        resources
            .create_resource(NewResource {
                name: Some(name.to_owned()),
                description: Some(description.to_owned()),
            })
            .await?;
    }
    if settings.settings().await?.admin_email.is_empty() {
        settings
            .update_settings(SettingsUpdate {
                admin_email: Some(DEMO_ADMIN_EMAIL.to_owned()),
                smtp_secret: None,
            })
            .await?;
    }
    info!(resources = DEMO_RESOURCES.len(), "demo data seeding applied");
    Ok(Some(DemoSeedOutcome::Applied {
        resources: DEMO_RESOURCES.len(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::{BookingPolicy, BookingService, BookingSnapshot, FacilityZone};
    use crate::outbound::persistence::InMemoryBookingStore;
    use crate::test_support::MutableClock;

    fn service(store: Arc<InMemoryBookingStore>) -> BookingService<InMemoryBookingStore> {
        BookingService::new(
            store,
            Arc::new(MutableClock::at_utc(2026, 1, 10, 12)),
            BookingPolicy::with_zone(FacilityZone::parse("Europe/Madrid").expect("zone")),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_does_nothing() {
        let store = Arc::new(InMemoryBookingStore::default());
        let service = service(store.clone());

        let outcome = seed_demo_data(false, &service, &service).await.expect("seed");

        assert_eq!(outcome, None);
        assert_eq!(store.save_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_store_receives_demo_courts_once() {
        let store = Arc::new(InMemoryBookingStore::new(BookingSnapshot::default()));
        let service = service(store.clone());

        let first = seed_demo_data(true, &service, &service).await.expect("seed");
        let second = seed_demo_data(true, &service, &service).await.expect("reseed");

        assert_eq!(first, Some(DemoSeedOutcome::Applied { resources: 2 }));
        assert_eq!(second, Some(DemoSeedOutcome::AlreadyPopulated));
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.resources.len(), 2);
        assert_eq!(snapshot.settings.admin_email, DEMO_ADMIN_EMAIL);
    }
}
