//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod clock_port;
mod weather_source_port;

pub use cache_port::{
    CacheEntry, CachePort, CacheStats, CachedPayload, WriteOrdering, WriteOutcome,
};
pub use clock_port::ClockPort;
#[cfg(test)]
pub use weather_source_port::MockWeatherSourcePort;
pub use weather_source_port::WeatherSourcePort;
