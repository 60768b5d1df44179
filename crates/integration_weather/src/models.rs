//! Weather data models
//!
//! Wire types for the OpenWeatherMap `weather` and `forecast` endpoints and
//! the flattened readings the client hands to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition block as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionInfo {
    /// Condition group ("Rain", "Clouds", ...)
    pub main: String,
    /// Longer description ("light rain")
    pub description: String,
    /// Icon code ("10d")
    pub icon: String,
}

/// Current conditions at a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Place name resolved by the service
    pub name: String,
    /// ISO 3166 country code
    pub country: Option<String>,
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Temperature in the requested units
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in the requested units
    pub wind_speed: f64,
    /// Primary condition
    pub condition: Option<ConditionInfo>,
    /// Latitude of the place
    pub latitude: f64,
    /// Longitude of the place
    pub longitude: f64,
}

/// One three-hourly forecast reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    /// Time the reading applies to
    pub time: DateTime<Utc>,
    /// Temperature in the requested units
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in the requested units
    pub wind_speed: f64,
    /// Primary condition
    pub condition: Option<ConditionInfo>,
}

/// Forecast for a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Place name resolved by the service
    pub city: Option<String>,
    /// ISO 3166 country code
    pub country: Option<String>,
    /// Latitude and longitude of the place
    pub coordinates: Option<(f64, f64)>,
    /// Shift of local time from UTC in seconds
    pub timezone_offset: i32,
    /// Readings in time order
    pub slots: Vec<ForecastSlot>,
}

// ============================================================================
// Raw API types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiSys {
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrentResponse {
    pub coord: ApiCoord,
    #[serde(default)]
    pub weather: Vec<ConditionInfo>,
    pub main: ApiMain,
    #[serde(default)]
    pub wind: ApiWind,
    pub dt: i64,
    #[serde(default)]
    pub sys: ApiSys,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastItem {
    pub dt: i64,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ConditionInfo>,
    #[serde(default)]
    pub wind: ApiWind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCity {
    pub name: Option<String>,
    pub country: Option<String>,
    pub coord: Option<ApiCoord>,
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastResponse {
    pub list: Vec<ApiForecastItem>,
    pub city: Option<ApiCity>,
}

/// Body of an unsuccessful response, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Text of `message`: strings as sent (even if only whitespace), numbers
    /// and `true` rendered. Empty strings, zero, `false` and `null` count as absent.
    pub(crate) fn into_message(self) -> Option<String> {
        match self.message? {
            serde_json::Value::String(text) if !text.is_empty() => Some(text),
            serde_json::Value::Number(n) if n.as_f64().is_some_and(|v| v.abs() > 0.0) => {
                Some(n.to_string())
            },
            serde_json::Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

impl ApiCurrentResponse {
    pub(crate) fn into_conditions(self) -> Option<CurrentConditions> {
        Some(CurrentConditions {
            name: self.name,
            country: self.sys.country,
            observed_at: timestamp(self.dt)?,
            temperature: self.main.temp,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            condition: self.weather.into_iter().next(),
            latitude: self.coord.lat,
            longitude: self.coord.lon,
        })
    }
}

impl ApiForecastResponse {
    pub(crate) fn into_forecast(self) -> Option<Forecast> {
        let slots = self
            .list
            .into_iter()
            .map(|item| {
                Some(ForecastSlot {
                    time: timestamp(item.dt)?,
                    temperature: item.main.temp,
                    humidity: item.main.humidity,
                    wind_speed: item.wind.speed,
                    condition: item.weather.into_iter().next(),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        let (city, country, coordinates, timezone_offset) = match self.city {
            Some(c) => (c.name, c.country, c.coord.map(|p| (p.lat, p.lon)), c.timezone),
            None => (None, None, None, 0),
        };

        Some(Forecast {
            city,
            country,
            coordinates,
            timezone_offset,
            slots,
        })
    }
}
