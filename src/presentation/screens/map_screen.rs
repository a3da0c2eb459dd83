//! Map screen: sensors with their latest air quality.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{Painter, ScreenOutput, report};
use crate::application::services::ScreenLifetime;
use crate::application::use_cases::{SensorMap, SensorReadingsUseCase, SubscriptionUseCase};
use crate::domain::entities::{SensorId, SubscriptionSet};
use crate::domain::ports::AlertPort;
use crate::domain::session::SessionState;

/// Sensors, readings and subscriptions.
pub struct MapScreen {
    readings: SensorReadingsUseCase,
    subscriptions: SubscriptionUseCase,
    alerts: Arc<dyn AlertPort>,
    painter: Painter,
    lifetime: ScreenLifetime,
}

impl MapScreen {
    /// Creates the screen with a fresh lifetime.
    #[must_use]
    pub fn new(
        readings: SensorReadingsUseCase,
        subscriptions: SubscriptionUseCase,
        alerts: Arc<dyn AlertPort>,
        painter: Painter,
    ) -> Self {
        Self {
            readings,
            subscriptions,
            alerts,
            painter,
            lifetime: ScreenLifetime::new(),
        }
    }

    /// Lists every sensor with its AQI and subscription mark.
    pub async fn show(&self, state: SessionState) -> ScreenOutput {
        match self.lifetime.scope().run(self.readings.overview(state)).await {
            Ok(map) => ScreenOutput::lines(self.render_map(&map)),
            Err(e) => {
                report(self.alerts.as_ref(), "Error", &e, "Failed to fetch sensors");
                ScreenOutput::default()
            }
        }
    }

    /// Shows the latest reading of one sensor.
    pub async fn reading(&self, sensor_id: &SensorId) -> ScreenOutput {
        match self.lifetime.scope().run(self.readings.latest(sensor_id)).await {
            Ok(reading) => {
                let mut lines = vec![self.painter.heading(&format!("Sensor {sensor_id}"))];
                lines.extend(self.painter.reading(&reading));
                ScreenOutput::lines(lines)
            }
            Err(e) => {
                report(
                    self.alerts.as_ref(),
                    "Error",
                    &e,
                    "Failed to fetch sensor reading",
                );
                ScreenOutput::default()
            }
        }
    }

    /// Subscribes to `sensor_id`, reporting its current AQI level.
    pub async fn subscribe(&self, sensor_id: &SensorId) -> ScreenOutput {
        let scope = self.lifetime.scope();
        let mut set = self.current_subscriptions().await;

        if let Err(e) = scope
            .run(self.subscriptions.subscribe(&mut set, sensor_id))
            .await
        {
            report(
                self.alerts.as_ref(),
                "Subscription failed",
                &e,
                "Failed to update subscription",
            );
            return ScreenOutput::default();
        }

        let line = match scope.run(self.readings.latest(sensor_id)).await {
            Ok(reading) => format!(
                "Subscribed to sensor {sensor_id} with AQI level: {}",
                self.painter.level(reading.aqi)
            ),
            Err(e) => {
                debug!(error = %e, "No reading to report after subscribing");
                format!("Subscribed to sensor {sensor_id}")
            }
        };
        ScreenOutput::lines(vec![line, self.subscription_count(&set)])
    }

    /// Unsubscribes from `sensor_id`.
    pub async fn unsubscribe(&self, sensor_id: &SensorId) -> ScreenOutput {
        let mut set = self.current_subscriptions().await;

        match self
            .lifetime
            .scope()
            .run(self.subscriptions.unsubscribe(&mut set, sensor_id))
            .await
        {
            Ok(()) => ScreenOutput::lines(vec![
                format!("Unsubscribed from sensor {sensor_id}"),
                self.subscription_count(&set),
            ]),
            Err(e) => {
                report(
                    self.alerts.as_ref(),
                    "Subscription failed",
                    &e,
                    "Failed to update subscription",
                );
                ScreenOutput::default()
            }
        }
    }

    async fn current_subscriptions(&self) -> SubscriptionSet {
        match self.lifetime.scope().run(self.subscriptions.load()).await {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "Failed to load subscriptions");
                SubscriptionSet::new()
            }
        }
    }

    fn subscription_count(&self, set: &SubscriptionSet) -> String {
        self.painter
            .dim(&format!("{} subscribed sensor(s)", set.len()))
    }

    fn render_map(&self, map: &SensorMap) -> Vec<String> {
        if map.sensors.is_empty() {
            return vec!["No sensors available.".to_string()];
        }

        let mut lines = vec![self.painter.heading("Sensors")];
        for overview in &map.sensors {
            let sensor = &overview.sensor;
            let mark = if map.subscriptions.contains(sensor.id()) {
                "★"
            } else {
                "·"
            };
            let mut header = format!("{mark} {} [{}]", sensor.title(), sensor.id());
            if !sensor.location().is_empty() {
                header.push_str(&format!("  {}", sensor.location()));
            }
            lines.push(header);
            lines.push(self.painter.dim(&format!("  at {}", sensor.coordinates())));

            match &overview.reading {
                Some(reading) => lines.extend(self.painter.reading(reading)),
                None => lines.push("  AQI: unavailable".to_string()),
            }
        }
        lines
    }
}
