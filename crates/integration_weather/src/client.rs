//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap 2.5 API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    ApiCurrentResponse, ApiErrorBody, ApiForecastResponse, CurrentConditions, Forecast,
};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request never produced a response (DNS, connect, timeout, reset)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status
    #[error("Weather service returned HTTP {status}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` field of the response body, when present
        message: Option<String>,
    },

    /// A success response could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid`
    #[serde(default)]
    pub api_key: String,

    /// Unit system (`metric`, `imperial` or `standard`)
    #[serde(default = "default_units")]
    pub units: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            units: default_units(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current conditions for a city name
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Current conditions at a position
    async fn current_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Three-hourly forecast at a position
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("base_url", &self.config.base_url)
            .field("units", &self.config.units)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a GET with the shared `units` and `appid` parameters
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.endpoint(endpoint);
        debug!(url = %url, "Requesting weather data");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[
                ("units", self.config.units.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    /// Build an `Api` error, pulling the `message` field out of the body if it parses
    async fn api_error(response: Response) -> WeatherError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
            .and_then(ApiErrorBody::into_message);

        debug!(status, message = ?message, "Weather service reported failure");
        WeatherError::Api { status, message }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let raw: ApiCurrentResponse = self.get_json("weather", &[("q", city.to_string())]).await?;
        raw.into_conditions()
            .ok_or_else(|| WeatherError::ParseError("Invalid observation timestamp".to_string()))
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn current_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];
        let raw: ApiCurrentResponse = self.get_json("weather", &params).await?;
        raw.into_conditions()
            .ok_or_else(|| WeatherError::ParseError("Invalid observation timestamp".to_string()))
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];
        let raw: ApiForecastResponse = self.get_json("forecast", &params).await?;
        raw.into_forecast()
            .ok_or_else(|| WeatherError::ParseError("Invalid forecast timestamp".to_string()))
    }
}
