//! Settings use-cases. Updates are serialized because the settings record is
//! saved as part of the whole booking document.

use async_trait::async_trait;
use tracing::info;

use super::{BookingService, Write};
use crate::domain::ports::{BookingStore, SettingsCommand};
use crate::domain::{BookingError, Settings, SettingsUpdate};

#[async_trait]
impl<S> SettingsCommand for BookingService<S>
where
    S: BookingStore + 'static,
{
    async fn settings(&self) -> Result<Settings, BookingError> {
        Ok(self.load().await?.settings)
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings, BookingError> {
        let settings = self
            .mutate(move |snapshot| {
                snapshot.settings.apply(update);
                Ok(Write::Persist(snapshot.settings.clone()))
            })
            .await?;
        info!(admin_email = %settings.admin_email, "settings updated");
        Ok(settings)
    }
}
