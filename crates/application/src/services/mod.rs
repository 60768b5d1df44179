//! Application services - Use case implementations

mod weather_gateway;
mod weather_session;

pub use weather_gateway::{CacheTtls, GatewayStats, WeatherGateway};
pub use weather_session::{WeatherReport, WeatherSession};
