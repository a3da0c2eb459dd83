//! Sensor subscriptions.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::{SensorId, SubscriptionSet};
use crate::domain::errors::ApiError;
use crate::domain::ports::AirQualityPort;

/// Subscribes to and unsubscribes from sensors, keeping a local set in step
/// with the backend.
#[derive(Clone)]
pub struct SubscriptionUseCase {
    api: Arc<dyn AirQualityPort>,
}

impl SubscriptionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(api: Arc<dyn AirQualityPort>) -> Self {
        Self { api }
    }

    /// Fetches the current subscription set.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn load(&self) -> Result<SubscriptionSet, ApiError> {
        let ids = self.api.subscribed_sensors().await?;
        Ok(ids.into_iter().collect())
    }

    /// Subscribes to a sensor and records it locally once the backend
    /// confirms.
    ///
    /// # Errors
    /// Returns the backend error; the local set is left unchanged.
    pub async fn subscribe(
        &self,
        subscriptions: &mut SubscriptionSet,
        sensor_id: &SensorId,
    ) -> Result<(), ApiError> {
        self.api.subscribe(sensor_id).await.map_err(|e| {
            warn!(sensor_id = %sensor_id, error = %e, "Subscribe failed");
            e
        })?;

        subscriptions.subscribe(sensor_id.clone());
        info!(sensor_id = %sensor_id, "Subscribed to sensor");
        Ok(())
    }

    /// Unsubscribes from a sensor and drops it locally once the backend
    /// confirms.
    ///
    /// # Errors
    /// Returns the backend error; the local set is left unchanged.
    pub async fn unsubscribe(
        &self,
        subscriptions: &mut SubscriptionSet,
        sensor_id: &SensorId,
    ) -> Result<(), ApiError> {
        self.api.unsubscribe(sensor_id).await.map_err(|e| {
            warn!(sensor_id = %sensor_id, error = %e, "Unsubscribe failed");
            e
        })?;

        subscriptions.unsubscribe(sensor_id);
        info!(sensor_id = %sensor_id, "Unsubscribed from sensor");
        Ok(())
    }
}
