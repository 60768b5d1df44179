//! Point-in-time weather reading for a place

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Textual condition as reported by the weather service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Short group name (e.g. "Clouds")
    pub main: String,
    /// Human-readable description (e.g. "broken clouds")
    pub description: String,
    /// Condition icon code (e.g. "04d")
    pub icon: String,
}

/// Current conditions for a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Location name as resolved by the service
    pub name: String,
    /// ISO 3166 country code, when known
    pub country: Option<String>,
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Temperature in the requested units
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in the requested units
    pub wind_speed: f64,
    /// Primary condition, if the service reported one
    pub condition: Option<Condition>,
    /// Coordinates of the reading
    pub location: GeoLocation,
}

impl WeatherSnapshot {
    /// "Name, CC" or just the name when the country is unknown
    #[must_use]
    pub fn place_label(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {country}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Condition description, or an empty string
    #[must_use]
    pub fn description(&self) -> &str {
        self.condition
            .as_ref()
            .map_or("", |condition| condition.description.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(country: Option<&str>) -> WeatherSnapshot {
        WeatherSnapshot {
            name: "Paris".to_string(),
            country: country.map(str::to_string),
            observed_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            temperature: 12.3,
            humidity: 81,
            wind_speed: 4.1,
            condition: Some(Condition {
                main: "Clouds".to_string(),
                description: "broken clouds".to_string(),
                icon: "04d".to_string(),
            }),
            location: GeoLocation::paris(),
        }
    }

    #[test]
    fn place_label_with_country() {
        assert_eq!(snapshot(Some("FR")).place_label(), "Paris, FR");
    }

    #[test]
    fn place_label_without_country() {
        assert_eq!(snapshot(None).place_label(), "Paris");
        assert_eq!(snapshot(Some("")).place_label(), "Paris");
    }

    #[test]
    fn description_falls_back_to_empty() {
        let mut s = snapshot(None);
        assert_eq!(s.description(), "broken clouds");
        s.condition = None;
        assert_eq!(s.description(), "");
    }
}
