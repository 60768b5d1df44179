//! Forecast bundle: a sequence of three-hourly readings

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::weather_snapshot::Condition;
use crate::value_objects::GeoLocation;

/// Number of days shown in a daily outlook
pub const OUTLOOK_DAYS: usize = 5;

/// One reading of a forecast (a reduced `WeatherSnapshot`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Time the reading applies to
    pub time: DateTime<Utc>,
    /// Temperature in the requested units
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in the requested units
    pub wind_speed: f64,
    /// Primary condition, if reported
    pub condition: Option<Condition>,
}

/// Forecast for a place, ordered by time as delivered by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Place name, when the service resolved one
    pub city: Option<String>,
    /// ISO 3166 country code, when known
    pub country: Option<String>,
    /// Coordinates of the place, when reported
    pub location: Option<GeoLocation>,
    /// Offset of the place's local time from UTC, in seconds
    #[serde(default)]
    pub utc_offset_secs: i32,
    /// Readings at fixed intervals
    pub entries: Vec<ForecastEntry>,
}

impl ForecastBundle {
    /// Local calendar day of a reading at the forecast's place
    #[must_use]
    pub fn local_date(&self, entry: &ForecastEntry) -> NaiveDate {
        let offset = FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix());
        entry.time.with_timezone(&offset).date_naive()
    }

    /// First reading of each day, skipping the first (current) day, limited to `days`
    #[must_use]
    pub fn daily_outlook(&self, days: usize) -> Vec<&ForecastEntry> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|entry| seen.insert(self.local_date(entry)))
            .skip(1)
            .take(days)
            .collect()
    }

    /// Whether the bundle carries no readings at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURS_3: i64 = 3 * 3600;

    fn entry(ts: i64, temperature: f64) -> ForecastEntry {
        ForecastEntry {
            time: DateTime::from_timestamp(ts, 0).unwrap(),
            temperature,
            humidity: 50,
            wind_speed: 3.0,
            condition: None,
        }
    }

    /// Seven days of three-hourly readings starting at 2024-01-15 12:00 UTC
    fn bundle(offset: i32) -> ForecastBundle {
        let start = 1_705_320_000; // 2024-01-15T12:00:00Z
        ForecastBundle {
            city: Some("Paris".into()),
            country: Some("FR".into()),
            location: Some(GeoLocation::paris()),
            utc_offset_secs: offset,
            entries: (0..56)
                .map(|i| entry(start + i * HOURS_3, f64::from(i32::try_from(i).unwrap())))
                .collect(),
        }
    }

    #[test]
    fn outlook_skips_today_and_takes_five_days() {
        let forecast = bundle(0);
        let days = forecast.daily_outlook(OUTLOOK_DAYS);
        assert_eq!(days.len(), 5);

        let dates: Vec<_> = days.iter().map(|e| forecast.local_date(e)).collect();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(dates[4], NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn outlook_picks_first_reading_of_each_day() {
        let forecast = bundle(0);
        let days = forecast.daily_outlook(OUTLOOK_DAYS);
        // 12:00, 15:00, 18:00, 21:00 on day one, then midnight of day two
        assert!((days[0].temperature - 4.0).abs() < f64::EPSILON);
        assert_eq!(days[0].time.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn outlook_respects_local_offset() {
        // UTC+2: day one ends at 22:00 UTC
        let forecast = bundle(7200);
        let days = forecast.daily_outlook(1);
        assert_eq!(days[0].time.format("%H:%M").to_string(), "00:00");
        assert_eq!(
            days[0]
                .time
                .with_timezone(&FixedOffset::east_opt(7200).unwrap())
                .format("%H:%M")
                .to_string(),
            "02:00"
        );
    }

    #[test]
    fn outlook_of_empty_bundle_is_empty() {
        let forecast = ForecastBundle {
            city: None,
            country: None,
            location: None,
            utc_offset_secs: 0,
            entries: vec![],
        };
        assert!(forecast.is_empty());
        assert!(forecast.daily_outlook(OUTLOOK_DAYS).is_empty());
    }

    #[test]
    fn invalid_offset_falls_back_to_utc() {
        let mut forecast = bundle(0);
        forecast.utc_offset_secs = i32::MAX;
        let first = &forecast.entries[0];
        assert_eq!(
            forecast.local_date(first),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }
}
