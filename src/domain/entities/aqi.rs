//! Air Quality Index classification from PM2.5 concentration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display colour associated with an AQI level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum AqiColor {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Maroon,
}

impl AqiColor {
    /// Returns the colour name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Maroon => "maroon",
        }
    }

    /// Returns the colour as an RGB triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Green => (0, 128, 0),
            Self::Yellow => (255, 255, 0),
            Self::Orange => (255, 165, 0),
            Self::Red => (255, 0, 0),
            Self::Purple => (128, 0, 128),
            Self::Maroon => (128, 0, 0),
        }
    }
}

impl fmt::Display for AqiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorical air-quality severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// All levels in ascending severity.
    pub const ALL: [Self; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Classifies a PM2.5 concentration in µg/m³.
    ///
    /// Each bucket is inclusive on its upper bound. Values that compare false
    /// against every breakpoint (NaN) fall through to `Hazardous`.
    #[must_use]
    pub fn from_pm25(pm25: f64) -> Self {
        if pm25 <= 50.0 {
            Self::Good
        } else if pm25 <= 100.0 {
            Self::Moderate
        } else if pm25 <= 150.0 {
            Self::UnhealthyForSensitiveGroups
        } else if pm25 <= 200.0 {
            Self::Unhealthy
        } else if pm25 <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }

    /// Parses a level label as sent by the backend, ignoring case and
    /// separators.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL.into_iter().find(|level| {
            let candidate: String = level
                .label()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect();
            candidate == normalized
        })
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Display colour.
    #[must_use]
    pub const fn color(self) -> AqiColor {
        match self {
            Self::Good => AqiColor::Green,
            Self::Moderate => AqiColor::Yellow,
            Self::UnhealthyForSensitiveGroups => AqiColor::Orange,
            Self::Unhealthy => AqiColor::Red,
            Self::VeryUnhealthy => AqiColor::Purple,
            Self::Hazardous => AqiColor::Maroon,
        }
    }
}

impl fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, AqiLevel::Good ; "zero")]
    #[test_case(49.0, AqiLevel::Good ; "below first boundary")]
    #[test_case(50.0, AqiLevel::Good ; "first boundary inclusive")]
    #[test_case(50.5, AqiLevel::Moderate ; "just above first boundary")]
    #[test_case(51.0, AqiLevel::Moderate ; "moderate lower")]
    #[test_case(100.0, AqiLevel::Moderate ; "moderate upper")]
    #[test_case(101.0, AqiLevel::UnhealthyForSensitiveGroups ; "sensitive lower")]
    #[test_case(150.0, AqiLevel::UnhealthyForSensitiveGroups ; "sensitive upper")]
    #[test_case(151.0, AqiLevel::Unhealthy ; "unhealthy lower")]
    #[test_case(200.0, AqiLevel::Unhealthy ; "unhealthy upper")]
    #[test_case(201.0, AqiLevel::VeryUnhealthy ; "very unhealthy lower")]
    #[test_case(300.0, AqiLevel::VeryUnhealthy ; "very unhealthy upper")]
    #[test_case(301.0, AqiLevel::Hazardous ; "hazardous")]
    #[test_case(1000.0, AqiLevel::Hazardous ; "far above scale")]
    fn test_classification_boundaries(pm25: f64, expected: AqiLevel) {
        assert_eq!(AqiLevel::from_pm25(pm25), expected);
    }

    #[test_case(AqiLevel::Good, AqiColor::Green)]
    #[test_case(AqiLevel::Moderate, AqiColor::Yellow)]
    #[test_case(AqiLevel::UnhealthyForSensitiveGroups, AqiColor::Orange)]
    #[test_case(AqiLevel::Unhealthy, AqiColor::Red)]
    #[test_case(AqiLevel::VeryUnhealthy, AqiColor::Purple)]
    #[test_case(AqiLevel::Hazardous, AqiColor::Maroon)]
    fn test_level_colors(level: AqiLevel, color: AqiColor) {
        assert_eq!(level.color(), color);
    }

    #[test]
    fn test_negative_reading_is_good() {
        assert_eq!(AqiLevel::from_pm25(-3.0), AqiLevel::Good);
    }

    #[test]
    fn test_from_label_accepts_backend_spellings() {
        assert_eq!(
            AqiLevel::from_label("Unhealthy for Sensitive Groups"),
            Some(AqiLevel::UnhealthyForSensitiveGroups)
        );
        assert_eq!(
            AqiLevel::from_label("very_unhealthy"),
            Some(AqiLevel::VeryUnhealthy)
        );
        assert_eq!(AqiLevel::from_label("GOOD"), Some(AqiLevel::Good));
        assert_eq!(AqiLevel::from_label("smoky"), None);
    }

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(AqiLevel::Good < AqiLevel::Moderate);
        assert!(AqiLevel::VeryUnhealthy < AqiLevel::Hazardous);
    }
}
