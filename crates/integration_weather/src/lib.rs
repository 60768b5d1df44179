//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Provides current conditions by city name or coordinates and the
//! three-hourly five-day forecast.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{ConditionInfo, CurrentConditions, Forecast, ForecastSlot};
