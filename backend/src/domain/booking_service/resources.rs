//! Resource administration use-cases.

use async_trait::async_trait;
use tracing::info;

use super::{BookingService, Write};
use crate::domain::ports::{BookingStore, NewResource, ResourceCommand};
use crate::domain::{BookingError, Resource, ResourceId};

#[async_trait]
impl<S> ResourceCommand for BookingService<S>
where
    S: BookingStore + 'static,
{
    async fn list_resources(&self) -> Result<Vec<Resource>, BookingError> {
        Ok(self.load().await?.resources)
    }

    async fn create_resource(&self, input: NewResource) -> Result<Resource, BookingError> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(BookingError::MissingField { field: "name" })?;
        let resource = Resource {
            id: ResourceId::random(),
            name: name.to_owned(),
            description: input
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
            created_at: self.clock.utc(),
        };

        let stored = resource.clone();
        self.mutate(move |snapshot| {
            snapshot.insert_resource(stored);
            Ok(Write::Persist(()))
        })
        .await?;
        info!(resource_id = %resource.id, name = %resource.name, "resource created");
        Ok(resource)
    }

    async fn delete_resource(&self, id: &ResourceId) -> Result<bool, BookingError> {
        let target = id.clone();
        let cascaded = self
            .mutate(move |snapshot| {
                Ok(match snapshot.remove_resource(&target) {
                    Some(removed) => Write::Persist(Some(removed)),
                    None => Write::Skip(None),
                })
            })
            .await?;
        match cascaded {
            Some(reservations) => {
                info!(resource_id = %id, reservations, "resource deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
