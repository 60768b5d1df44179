//! Domain entities - weather payloads and session-scoped search history

mod forecast;
mod recent_cities;
mod weather_snapshot;

pub use forecast::{ForecastBundle, ForecastEntry, OUTLOOK_DAYS};
pub use recent_cities::{DEFAULT_RECENT_CAPACITY, RecentCities};
pub use weather_snapshot::{Condition, WeatherSnapshot};
