//! Plain-text and JSON rendering of weather payloads

use application::{CacheTtls, GatewayStats, WeatherReport};
use domain::{ForecastBundle, ForecastEntry, OUTLOOK_DAYS, WeatherSnapshot};
use serde::Serialize;

/// Unit suffixes for the configured unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitLabels {
    pub temperature: &'static str,
    pub speed: &'static str,
}

impl UnitLabels {
    /// Labels for an OpenWeatherMap `units` value
    pub fn for_units(units: &str) -> Self {
        match units {
            "imperial" => Self {
                temperature: "°F",
                speed: "mph",
            },
            "standard" => Self {
                temperature: "K",
                speed: "m/s",
            },
            _ => Self {
                temperature: "°C",
                speed: "m/s",
            },
        }
    }
}

/// One line for current conditions
pub fn current_line(current: &WeatherSnapshot, units: UnitLabels) -> String {
    let mut line = format!(
        "{}  {:.1}{}",
        current.place_label(),
        current.temperature,
        units.temperature
    );
    if !current.description().is_empty() {
        line.push_str(&format!("  {}", current.description()));
    }
    line.push_str(&format!(
        "  humidity {}%  wind {:.1} {}  ({})",
        current.humidity,
        current.wind_speed,
        units.speed,
        current.observed_at.format("%Y-%m-%d %H:%M UTC")
    ));
    line
}

/// One line for a forecast reading, timestamped in the place's local time
pub fn entry_line(bundle: &ForecastBundle, entry: &ForecastEntry, units: UnitLabels) -> String {
    let date = bundle.local_date(entry);
    let mut line = format!(
        "{}  {}  {:.1}{}",
        date.format("%a %Y-%m-%d"),
        entry.time.format("%H:%M UTC"),
        entry.temperature,
        units.temperature
    );
    if let Some(condition) = &entry.condition {
        line.push_str(&format!("  {}", condition.description));
    }
    line.push_str(&format!(
        "  humidity {}%  wind {:.1} {}",
        entry.humidity, entry.wind_speed, units.speed
    ));
    line
}

/// Lines of the daily outlook (first reading of each of the next days)
pub fn outlook_lines(bundle: &ForecastBundle, units: UnitLabels) -> Vec<String> {
    bundle
        .daily_outlook(OUTLOOK_DAYS)
        .into_iter()
        .map(|entry| entry_line(bundle, entry, units))
        .collect()
}

/// Lines of every forecast reading
pub fn forecast_lines(bundle: &ForecastBundle, units: UnitLabels) -> Vec<String> {
    bundle
        .entries
        .iter()
        .map(|entry| entry_line(bundle, entry, units))
        .collect()
}

/// Text form of a chained report
pub fn report_lines(report: &WeatherReport, units: UnitLabels) -> Vec<String> {
    let mut lines = vec![current_line(&report.current, units)];
    match &report.forecast {
        Ok(bundle) => lines.extend(outlook_lines(bundle, units)),
        Err(e) => lines.push(format!("forecast unavailable: {e}")),
    }
    lines
}

/// JSON form of a chained report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub current: &'a WeatherSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<&'a ForecastBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_error: Option<String>,
}

impl<'a> From<&'a WeatherReport> for JsonReport<'a> {
    fn from(report: &'a WeatherReport) -> Self {
        Self {
            current: &report.current,
            forecast: report.forecast(),
            forecast_error: report.forecast.as_ref().err().map(ToString::to_string),
        }
    }
}

/// One line summarizing gateway counters and freshness windows
pub fn stats_line(stats: &GatewayStats, ttls: CacheTtls) -> String {
    format!(
        "cache hits {}  misses {}  stale {}  failures {}  hit rate {:.0}%  ttl current {}s  forecast {}s",
        stats.hits,
        stats.misses,
        stats.stale,
        stats.failures,
        stats.hit_rate() * 100.0,
        ttls.current.as_secs(),
        ttls.forecast.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use application::ApplicationError;
    use chrono::DateTime;
    use domain::{Condition, GeoLocation};

    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            name: "Paris".into(),
            country: Some("FR".into()),
            observed_at: DateTime::from_timestamp(1_705_320_000, 0).unwrap(),
            temperature: 14.2,
            humidity: 72,
            wind_speed: 3.6,
            condition: Some(Condition {
                main: "Clouds".into(),
                description: "broken clouds".into(),
                icon: "04d".into(),
            }),
            location: GeoLocation::paris(),
        }
    }

    fn bundle() -> ForecastBundle {
        ForecastBundle {
            city: Some("Paris".into()),
            country: Some("FR".into()),
            location: Some(GeoLocation::paris()),
            utc_offset_secs: 0,
            entries: (0..16)
                .map(|i| ForecastEntry {
                    time: DateTime::from_timestamp(1_705_320_000 + i * 10_800, 0).unwrap(),
                    temperature: 5.0,
                    humidity: 60,
                    wind_speed: 2.0,
                    condition: None,
                })
                .collect(),
        }
    }

    #[test]
    fn unit_labels() {
        assert_eq!(UnitLabels::for_units("metric").temperature, "°C");
        assert_eq!(UnitLabels::for_units("imperial").speed, "mph");
        assert_eq!(UnitLabels::for_units("standard").temperature, "K");
    }

    #[test]
    fn current_line_contains_reading() {
        let line = current_line(&snapshot(), UnitLabels::for_units("metric"));
        assert_eq!(
            line,
            "Paris, FR  14.2°C  broken clouds  humidity 72%  wind 3.6 m/s  (2024-01-15 12:00 UTC)"
        );
    }

    #[test]
    fn outlook_skips_first_day() {
        let lines = outlook_lines(&bundle(), UnitLabels::for_units("metric"));
        // 16 readings from Jan 15 12:00 reach Jan 17 09:00
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Tue 2024-01-16  00:00 UTC"));
    }

    #[test]
    fn report_with_failed_forecast_keeps_current_line() {
        let report = WeatherReport {
            current: Arc::new(snapshot()),
            forecast: Err(ApplicationError::Lookup("Forecast not available".into())),
        };
        let lines = report_lines(&report, UnitLabels::for_units("metric"));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "forecast unavailable: Forecast not available");

        let json = serde_json::to_value(JsonReport::from(&report)).unwrap();
        assert_eq!(json["current"]["name"], "Paris");
        assert!(json.get("forecast").is_none());
        assert_eq!(json["forecast_error"], "Forecast not available");
    }

    #[test]
    fn stats_line_formats_rate() {
        let stats = GatewayStats {
            hits: 1,
            misses: 1,
            stale: 0,
            failures: 0,
        };
        let line = stats_line(&stats, CacheTtls::default());
        assert!(line.contains("hit rate 50%"));
        assert!(line.ends_with("ttl current 600s  forecast 1800s"));
    }
}
