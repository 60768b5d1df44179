//! Remote weather source port
//!
//! The capability the gateway uses to reach the weather service. Adapters
//! normalize transport and service failures into `ApplicationError` before
//! returning.

use async_trait::async_trait;
use domain::{CityName, ForecastBundle, GeoLocation, WeatherSnapshot};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching weather data from a remote service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherSourcePort: Send + Sync {
    /// Current weather by city name
    async fn current_by_city(&self, city: &CityName) -> Result<WeatherSnapshot, ApplicationError>;

    /// Current weather by coordinates
    async fn current_by_coords(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherSnapshot, ApplicationError>;

    /// Three-hourly forecast by coordinates
    async fn forecast(&self, location: &GeoLocation) -> Result<ForecastBundle, ApplicationError>;
}
