//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenWeatherMap
//! adapter, the in-memory response cache and clocks. Also owns configuration
//! loading and tracing setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;

use std::sync::Arc;

use application::{ApplicationError, WeatherGateway, WeatherSession};

pub use adapters::*;
pub use cache::InMemoryResponseCache;
pub use config::{AppConfig, CacheConfig, RecentConfig, WeatherAppConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_tracing};

/// Wire a gateway from configuration: OpenWeatherMap adapter, in-memory
/// cache and the system clock
///
/// # Errors
///
/// Returns `Configuration` if the API key is missing or the HTTP client
/// cannot be built.
pub fn build_gateway(config: &AppConfig) -> Result<WeatherGateway, ApplicationError> {
    let adapter = OpenWeatherAdapter::from_app_config(&config.weather)?;
    let cache = InMemoryResponseCache::with_ordering(config.cache.write_ordering());

    Ok(
        WeatherGateway::new(Arc::new(adapter), Arc::new(cache), Arc::new(SystemClock))
            .with_ttls(config.cache.ttls()),
    )
}

/// Wire a session over a freshly built gateway
///
/// # Errors
///
/// As for [`build_gateway`].
pub fn build_session(config: &AppConfig) -> Result<WeatherSession, ApplicationError> {
    let gateway = build_gateway(config)?;
    Ok(WeatherSession::new(
        Arc::new(gateway),
        config.recent.capacity,
    ))
}
