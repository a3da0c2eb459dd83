//! Notification loading use case.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::SessionContext;
use crate::domain::entities::NotificationFeed;
use crate::domain::errors::ApiError;
use crate::domain::ports::AirQualityPort;

/// Loads the signed-in user's notifications.
#[derive(Clone)]
pub struct LoadNotificationsUseCase {
    api: Arc<dyn AirQualityPort>,
    session: Arc<SessionContext>,
}

impl LoadNotificationsUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(api: Arc<dyn AirQualityPort>, session: Arc<SessionContext>) -> Self {
        Self { api, session }
    }

    /// Fetches notifications and applies ids already read on this device.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] without a credential, or the
    /// backend error.
    pub async fn execute(&self, locally_read: BTreeSet<String>) -> Result<NotificationFeed, ApiError> {
        if self.session.token().await.is_none() {
            warn!("No access token found, not fetching notifications");
            return Err(ApiError::NotAuthenticated);
        }

        let items = self.api.notifications().await?;
        debug!(count = items.len(), "Fetched notifications");

        Ok(NotificationFeed::new(items, locally_read))
    }
}
