//! Weather adapter - Implements WeatherSourcePort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherSourcePort;
use async_trait::async_trait;
use domain::{
    CityName, Condition, DomainError, ForecastBundle, ForecastEntry, GeoLocation, LookupKind,
    WeatherSnapshot,
};
use integration_weather::{
    ConditionInfo, CurrentConditions, Forecast, OpenWeatherMapClient, WeatherClient,
    WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

use crate::config::WeatherAppConfig;

/// Adapter for the OpenWeatherMap service
pub struct OpenWeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("client", &"OpenWeatherMapClient")
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Create with a client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Box::new(client)))
    }

    /// Create from application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client fails
    /// to initialize.
    pub fn from_app_config(config: &WeatherAppConfig) -> Result<Self, ApplicationError> {
        if !config.has_api_key() {
            return Err(ApplicationError::Configuration(format!(
                "weather API key is missing; set {} or weather.api_key",
                crate::config::API_KEY_ENV
            )));
        }
        Self::with_config(config.to_client_config())
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Box<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map a client error into the gateway's error taxonomy
    fn map_error(kind: LookupKind, err: WeatherError) -> ApplicationError {
        let mapped = match err {
            WeatherError::ConnectionFailed(e) => ApplicationError::Transport(e),
            WeatherError::Api { status, message } => {
                debug!(status, kind = %kind, "Service rejected lookup");
                ApplicationError::lookup(kind, message)
            },
            WeatherError::ParseError(e) => ApplicationError::MalformedResponse(e),
            WeatherError::InvalidCoordinates => ApplicationError::Domain(
                DomainError::ValidationError(format!("coordinates out of range for {kind} lookup")),
            ),
        };
        debug!(kind = %kind, error = %mapped, "Normalized weather lookup failure");
        mapped
    }

    fn map_condition(info: ConditionInfo) -> Condition {
        Condition {
            main: info.main,
            description: info.description,
            icon: info.icon,
        }
    }

    fn map_location(latitude: f64, longitude: f64) -> Result<GeoLocation, ApplicationError> {
        GeoLocation::new(latitude, longitude).map_err(|e| {
            ApplicationError::MalformedResponse(format!("service reported {e}"))
        })
    }

    fn map_current(current: CurrentConditions) -> Result<WeatherSnapshot, ApplicationError> {
        Ok(WeatherSnapshot {
            location: Self::map_location(current.latitude, current.longitude)?,
            name: current.name,
            country: current.country,
            observed_at: current.observed_at,
            temperature: current.temperature,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            condition: current.condition.map(Self::map_condition),
        })
    }

    fn map_forecast(forecast: Forecast) -> Result<ForecastBundle, ApplicationError> {
        let location = forecast
            .coordinates
            .map(|(lat, lon)| Self::map_location(lat, lon))
            .transpose()?;

        Ok(ForecastBundle {
            city: forecast.city,
            country: forecast.country,
            location,
            utc_offset_secs: forecast.timezone_offset,
            entries: forecast
                .slots
                .into_iter()
                .map(|slot| ForecastEntry {
                    time: slot.time,
                    temperature: slot.temperature,
                    humidity: slot.humidity,
                    wind_speed: slot.wind_speed,
                    condition: slot.condition.map(Self::map_condition),
                })
                .collect(),
        })
    }
}

#[async_trait]
impl WeatherSourcePort for OpenWeatherAdapter {
    #[instrument(skip(self, city), fields(city = %city))]
    async fn current_by_city(&self, city: &CityName) -> Result<WeatherSnapshot, ApplicationError> {
        let current = self
            .client
            .current_by_city(city.as_str())
            .await
            .map_err(|e| Self::map_error(LookupKind::City, e))?;

        debug!(place = %current.name, temperature = current.temperature, "Retrieved current weather");
        Self::map_current(current)
    }

    #[instrument(skip(self, location), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn current_by_coords(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherSnapshot, ApplicationError> {
        let current = self
            .client
            .current_by_coords(location.latitude(), location.longitude())
            .await
            .map_err(|e| Self::map_error(LookupKind::Coord, e))?;

        debug!(place = %current.name, temperature = current.temperature, "Retrieved current weather");
        Self::map_current(current)
    }

    #[instrument(skip(self, location), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn forecast(&self, location: &GeoLocation) -> Result<ForecastBundle, ApplicationError> {
        let forecast = self
            .client
            .forecast(location.latitude(), location.longitude())
            .await
            .map_err(|e| Self::map_error(LookupKind::Forecast, e))?;

        debug!(readings = forecast.slots.len(), "Retrieved weather forecast");
        Self::map_forecast(forecast)
    }
}
