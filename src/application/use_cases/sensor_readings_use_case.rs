//! Sensor map data: sensors, their latest readings and subscription marks.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{Sensor, SensorId, SensorReading, SubscriptionSet};
use crate::domain::errors::ApiError;
use crate::domain::ports::AirQualityPort;
use crate::domain::session::SessionState;

/// One sensor as shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorOverview {
    /// The sensor.
    pub sensor: Sensor,
    /// Latest reading, if the backend had one.
    pub reading: Option<SensorReading>,
}

/// Everything the map screen shows.
#[derive(Debug, Clone, Default)]
pub struct SensorMap {
    /// Sensors in backend order.
    pub sensors: Vec<SensorOverview>,
    /// Subscriptions of the signed-in user; empty when signed out.
    pub subscriptions: SubscriptionSet,
}

/// Loads sensors and readings.
#[derive(Clone)]
pub struct SensorReadingsUseCase {
    api: Arc<dyn AirQualityPort>,
}

impl SensorReadingsUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(api: Arc<dyn AirQualityPort>) -> Self {
        Self { api }
    }

    /// Loads the sensor list, each sensor's latest reading and, when signed
    /// in, the subscription set.
    ///
    /// Per-sensor reading failures leave that reading empty. A failed
    /// subscription fetch leaves the set empty.
    ///
    /// # Errors
    /// Returns error only if the sensor list cannot be fetched.
    pub async fn overview(&self, state: SessionState) -> Result<SensorMap, ApiError> {
        let sensors = self.api.list_sensors().await?;
        debug!(count = sensors.len(), "Fetched sensors");

        let mut overviews = Vec::with_capacity(sensors.len());
        for sensor in sensors {
            let reading = match self.api.latest_reading(sensor.id()).await {
                Ok(reading) => Some(reading),
                Err(e) => {
                    warn!(sensor_id = %sensor.id(), error = %e, "Failed to fetch latest reading");
                    None
                }
            };
            overviews.push(SensorOverview { sensor, reading });
        }

        let subscriptions = match state {
            SessionState::Authenticated => match self.api.subscribed_sensors().await {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!(error = %e, "Failed to fetch subscribed sensors");
                    SubscriptionSet::new()
                }
            },
            SessionState::Unauthenticated => SubscriptionSet::new(),
        };

        Ok(SensorMap {
            sensors: overviews,
            subscriptions,
        })
    }

    /// Fetches the latest reading of one sensor.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn latest(&self, sensor_id: &SensorId) -> Result<SensorReading, ApiError> {
        self.api.latest_reading(sensor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AqiLevel, Coordinates, ParticulateMatter};
    use crate::domain::ports::mocks::MockAirQualityPort;

    fn sensor(id: &str) -> Sensor {
        Sensor::new(
            SensorId::new(id),
            format!("Sensor {id}"),
            "Bucharest",
            Coordinates {
                latitude: 44.42,
                longitude: 26.09,
            },
        )
    }

    fn reading(id: &SensorId, pm25: f64) -> SensorReading {
        SensorReading::new(
            id.clone(),
            ParticulateMatter {
                pm1: Some(1.0),
                pm25: Some(pm25),
                pm10: Some(3.0),
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_overview_signed_out_skips_subscriptions() {
        let mut api = MockAirQualityPort::new();
        api.expect_list_sensors()
            .returning(|| Ok(vec![sensor("a"), sensor("b")]));
        api.expect_latest_reading()
            .returning(|id| Ok(reading(id, 75.0)));
        api.expect_subscribed_sensors().never();

        let use_case = SensorReadingsUseCase::new(Arc::new(api));
        let map = use_case.overview(SessionState::Unauthenticated).await.unwrap();

        assert_eq!(map.sensors.len(), 2);
        assert!(map.subscriptions.is_empty());
        assert_eq!(
            map.sensors[0].reading.as_ref().and_then(|r| r.aqi),
            Some(AqiLevel::Moderate)
        );
    }

    #[tokio::test]
    async fn test_overview_signed_in_marks_subscriptions() {
        let mut api = MockAirQualityPort::new();
        api.expect_list_sensors()
            .returning(|| Ok(vec![sensor("a"), sensor("b")]));
        api.expect_latest_reading()
            .returning(|id| Ok(reading(id, 10.0)));
        api.expect_subscribed_sensors()
            .returning(|| Ok(vec![SensorId::new("b")]));

        let use_case = SensorReadingsUseCase::new(Arc::new(api));
        let map = use_case.overview(SessionState::Authenticated).await.unwrap();

        assert!(map.subscriptions.contains(&SensorId::new("b")));
        assert!(!map.subscriptions.contains(&SensorId::new("a")));
    }

    #[tokio::test]
    async fn test_reading_failure_is_isolated() {
        let mut api = MockAirQualityPort::new();
        api.expect_list_sensors()
            .returning(|| Ok(vec![sensor("a"), sensor("b")]));
        api.expect_latest_reading().returning(|id| {
            if id.as_str() == "a" {
                Err(ApiError::status(404, None))
            } else {
                Ok(reading(id, 10.0))
            }
        });

        let use_case = SensorReadingsUseCase::new(Arc::new(api));
        let map = use_case.overview(SessionState::Unauthenticated).await.unwrap();

        assert!(map.sensors[0].reading.is_none());
        assert!(map.sensors[1].reading.is_some());
    }

    #[tokio::test]
    async fn test_sensor_list_failure_propagates() {
        let mut api = MockAirQualityPort::new();
        api.expect_list_sensors()
            .returning(|| Err(ApiError::network("offline")));

        let use_case = SensorReadingsUseCase::new(Arc::new(api));
        let result = use_case.overview(SessionState::Authenticated).await;

        assert!(matches!(result, Err(ApiError::Network { .. })));
    }
}
