//! Sensor and reading entities.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aqi::AqiLevel;

/// Backend identifier of a sensor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(String);

impl SensorId {
    /// Creates a sensor id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A geolocated air-quality sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    id: SensorId,
    title: String,
    location: String,
    coordinates: Coordinates,
}

impl Sensor {
    /// Creates a sensor.
    #[must_use]
    pub fn new(
        id: SensorId,
        title: impl Into<String>,
        location: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            location: location.into(),
            coordinates,
        }
    }

    /// Sensor id.
    #[must_use]
    pub const fn id(&self) -> &SensorId {
        &self.id
    }

    /// Display title, falling back to the id when the backend sent none.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            self.id.as_str()
        } else {
            &self.title
        }
    }

    /// Location label.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Position.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

/// Particulate matter concentrations in µg/m³. Absent when the sensor
/// reported no value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticulateMatter {
    /// PM1.
    pub pm1: Option<f64>,
    /// PM2.5.
    pub pm25: Option<f64>,
    /// PM10.
    pub pm10: Option<f64>,
}

/// Latest measurement reported by a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Sensor that produced the reading.
    pub sensor_id: SensorId,
    /// Temperature in °C.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Particulate concentrations.
    pub particulates: ParticulateMatter,
    /// Severity, either provided by the backend or derived from PM2.5.
    /// `None` when neither is available.
    pub aqi: Option<AqiLevel>,
    /// Measurement time.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl SensorReading {
    /// Builds a reading. A recognised `server_level` wins over client-side
    /// classification of PM2.5. Without either the level stays unknown.
    #[must_use]
    pub fn new(
        sensor_id: SensorId,
        particulates: ParticulateMatter,
        server_level: Option<&str>,
    ) -> Self {
        let aqi = server_level
            .and_then(AqiLevel::from_label)
            .or_else(|| particulates.pm25.map(AqiLevel::from_pm25));

        Self {
            sensor_id,
            temperature: None,
            humidity: None,
            particulates,
            aqi,
            recorded_at: None,
        }
    }

    /// Sets climate values.
    #[must_use]
    pub fn with_climate(mut self, temperature: Option<f64>, humidity: Option<f64>) -> Self {
        self.temperature = temperature;
        self.humidity = humidity;
        self
    }

    /// Sets measurement time.
    #[must_use]
    pub fn recorded_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.recorded_at = at;
        self
    }
}
