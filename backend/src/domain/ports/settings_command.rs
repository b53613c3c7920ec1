//! Driving port for the admin settings record.

use async_trait::async_trait;

use crate::domain::{BookingError, Settings, SettingsUpdate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsCommand: Send + Sync {
    async fn settings(&self) -> Result<Settings, BookingError>;

    /// Apply a partial update and return the stored result.
    async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings, BookingError>;
}
