//! Application configuration
//!
//! Split into focused sub-modules:
//! - `weather`: OpenWeatherMap endpoint, key, units, timeout
//! - `cache`: freshness windows and write ordering
//!
//! Logging settings live with the subscriber in `telemetry`.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `skycast.toml` in the working directory (optional) or an explicit file
//! 3. environment variables `SKYCAST_<SECTION>__<KEY>`, e.g. `SKYCAST_CACHE__CURRENT_TTL_SECS`
//! 4. `SKYCAST_WEATHER_API_KEY` for the API key

mod cache;
mod weather;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use cache::CacheConfig;
pub use weather::WeatherAppConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SKYCAST";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "SKYCAST_WEATHER_API_KEY";

/// Config file looked up in the working directory (extension resolved by `config`)
pub const DEFAULT_CONFIG_FILE: &str = "skycast";

/// Recent-search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentConfig {
    /// Number of remembered city searches (default: 5)
    #[serde(default = "default_recent_capacity")]
    pub capacity: usize,
}

const fn default_recent_capacity() -> usize {
    domain::DEFAULT_RECENT_CAPACITY
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            capacity: default_recent_capacity(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Recent-search settings
    #[serde(default)]
    pub recent: RecentConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and an optional file
    ///
    /// With `path = None` the file `skycast.toml` is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load configuration using `env` in place of the process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Map<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let api_key = env.get(API_KEY_ENV).cloned();

        let builder = config::Config::builder();
        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config = builder
            // Override with environment variables (e.g., SKYCAST_CACHE__MONOTONIC_WRITES)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .set_override_option("weather.api_key", api_key)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        debug!(
            base_url = %config.weather.base_url,
            has_api_key = config.weather.has_api_key(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use application::WriteOrdering;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::telemetry::LogFormat;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_any_source() {
        let config = AppConfig::default();
        assert_eq!(config.cache.current_ttl_secs, 600);
        assert_eq!(config.cache.forecast_ttl_secs, 1800);
        assert!(!config.cache.monotonic_writes);
        assert_eq!(config.recent.capacity, 5);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn file_values_are_applied() {
        let file = write_config(
            r#"
            [weather]
            base_url = "http://localhost:8080"
            api_key = "from-file"
            timeout_secs = 5

            [cache]
            current_ttl_secs = 60
            monotonic_writes = true

            [telemetry]
            log_format = "json"

            [recent]
            capacity = 3
            "#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.weather.base_url, "http://localhost:8080");
        assert_eq!(
            config.weather.api_key.as_ref().unwrap().expose_secret(),
            "from-file"
        );
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.cache.current_ttl_secs, 60);
        assert_eq!(config.cache.forecast_ttl_secs, 1800);
        assert_eq!(config.cache.write_ordering(), WriteOrdering::Monotonic);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(config.recent.capacity, 3);
    }

    #[test]
    fn api_key_env_overrides_file() {
        let file = write_config("[weather]\napi_key = \"from-file\"\n");
        let config =
            AppConfig::load_with_env(Some(file.path()), env(&[(API_KEY_ENV, "from-env")]))
                .unwrap();
        assert_eq!(
            config.weather.api_key.as_ref().unwrap().expose_secret(),
            "from-env"
        );
    }

    #[test]
    fn nested_env_overrides() {
        let file = write_config("");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("SKYCAST_CACHE__FORECAST_TTL_SECS", "900"),
                ("SKYCAST_WEATHER__UNITS", "imperial"),
            ]),
        )
        .unwrap();
        assert_eq!(config.cache.forecast_ttl_secs, 900);
        assert_eq!(config.weather.units, "imperial");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_with_env(
            Some(Path::new("/nonexistent/skycast-test.toml")),
            env(&[]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_value_is_an_error() {
        let file = write_config("[cache]\ncurrent_ttl_secs = \"soon\"\n");
        assert!(AppConfig::load_with_env(Some(file.path()), env(&[])).is_err());
    }
}
