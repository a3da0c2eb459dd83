//! Text rendering shared by the screens.

use chrono::{DateTime, Local, Utc};
use crossterm::style::{Attribute, Color, Stylize};

use crate::domain::entities::{AqiLevel, Notification, SensorReading};

/// Formats values for the terminal, with or without colour.
#[derive(Debug, Clone)]
pub struct Painter {
    color: bool,
    timestamp_format: String,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new(false, "%Y-%m-%d %H:%M")
    }
}

impl Painter {
    /// Creates a painter.
    #[must_use]
    pub fn new(color: bool, timestamp_format: impl Into<String>) -> Self {
        Self {
            color,
            timestamp_format: timestamp_format.into(),
        }
    }

    /// AQI label in its level colour.
    #[must_use]
    pub fn aqi(&self, level: AqiLevel) -> String {
        if !self.color {
            return format!("{} ({})", level.label(), level.color());
        }
        let (r, g, b) = level.color().rgb();
        level
            .label()
            .with(Color::Rgb { r, g, b })
            .attribute(Attribute::Bold)
            .to_string()
    }

    /// AQI label, or a dimmed placeholder when the level is unknown.
    #[must_use]
    pub fn level(&self, level: Option<AqiLevel>) -> String {
        level.map_or_else(|| self.dim("No data"), |level| self.aqi(level))
    }

    /// Bold heading.
    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.attribute(Attribute::Bold).to_string()
        } else {
            text.to_string()
        }
    }

    /// De-emphasized text.
    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.with(Color::DarkGrey).to_string()
        } else {
            text.to_string()
        }
    }

    /// Local time, or `-` when unknown.
    #[must_use]
    pub fn timestamp(&self, at: Option<DateTime<Utc>>) -> String {
        at.map_or_else(
            || "-".to_string(),
            |at| {
                at.with_timezone(&Local)
                    .format(&self.timestamp_format)
                    .to_string()
            },
        )
    }

    /// Detail lines for a reading.
    #[must_use]
    pub fn reading(&self, reading: &SensorReading) -> Vec<String> {
        let pm = reading.particulates;
        vec![
            format!("  AQI: {}", self.level(reading.aqi)),
            format!(
                "  Temperature: {}   Humidity: {}",
                optional(reading.temperature, "°C"),
                optional(reading.humidity, "%")
            ),
            format!(
                "  PM1: {}   PM2.5: {}   PM10: {}",
                optional(pm.pm1, ""),
                optional(pm.pm25, ""),
                optional(pm.pm10, "")
            ),
            format!("  Measured: {}", self.timestamp(reading.recorded_at)),
        ]
    }

    /// One notification line with a read marker.
    #[must_use]
    pub fn notification(&self, notification: &Notification) -> String {
        let marker = if notification.is_read { " " } else { "●" };
        let line = format!(
            "{marker} {}  {}",
            self.timestamp(notification.created_at),
            notification.message
        );
        if notification.is_read {
            self.dim(&line)
        } else {
            line
        }
    }
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn optional(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{}{unit}", number(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ParticulateMatter, SensorId};

    #[test]
    fn test_plain_aqi_names_color() {
        let painter = Painter::default();
        assert_eq!(painter.aqi(AqiLevel::Moderate), "Moderate (yellow)");
        assert_eq!(
            painter.aqi(AqiLevel::UnhealthyForSensitiveGroups),
            "Unhealthy for Sensitive Groups (orange)"
        );
    }

    #[test]
    fn test_colored_aqi_keeps_label() {
        let painter = Painter::new(true, "%H:%M");
        assert!(painter.aqi(AqiLevel::Hazardous).contains("Hazardous"));
    }

    #[test]
    fn test_missing_values_render_as_dash() {
        let painter = Painter::default();
        let reading = SensorReading::new(
            SensorId::new("ii3254"),
            ParticulateMatter {
                pm1: Some(5.0),
                pm25: Some(10.0),
                pm10: Some(20.5),
            },
            None,
        );

        let lines = painter.reading(&reading);

        assert_eq!(lines[0], "  AQI: Good (green)");
        assert_eq!(lines[1], "  Temperature: -   Humidity: -");
        assert_eq!(lines[2], "  PM1: 5   PM2.5: 10   PM10: 20.5");
        assert_eq!(lines[3], "  Measured: -");
    }

    #[test]
    fn test_reading_without_measurements_shows_no_data() {
        let painter = Painter::default();
        let reading =
            SensorReading::new(SensorId::new("i1"), ParticulateMatter::default(), None);

        let lines = painter.reading(&reading);

        assert_eq!(lines[0], "  AQI: No data");
        assert_eq!(lines[2], "  PM1: -   PM2.5: -   PM10: -");
    }

    #[test]
    fn test_unread_notification_is_marked() {
        let painter = Painter::default();
        let line = painter.notification(&Notification::new("1", "PM2.5 above 150"));
        assert!(line.starts_with('●'));
        assert!(line.ends_with("PM2.5 above 150"));
    }
}
