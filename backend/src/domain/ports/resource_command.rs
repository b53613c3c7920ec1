//! Driving port for administering bookable resources.

use async_trait::async_trait;

use crate::domain::{BookingError, Resource, ResourceId};

/// Input for a new resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewResource {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceCommand: Send + Sync {
    async fn list_resources(&self) -> Result<Vec<Resource>, BookingError>;

    /// Create a resource; the trimmed name is required.
    async fn create_resource(&self, input: NewResource) -> Result<Resource, BookingError>;

    /// Delete a resource and all its reservations. `Ok(false)` when unknown.
    async fn delete_resource(&self, id: &ResourceId) -> Result<bool, BookingError>;
}
