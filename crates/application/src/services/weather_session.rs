//! Weather session
//!
//! Drives the gateway the way an interactive front end does: a city search
//! or a located lookup fetches current conditions first and then the
//! forecast for the coordinates those conditions report. A forecast failure
//! is returned next to the current weather rather than replacing it.
//!
//! The session also keeps the recent-search list for its lifetime.

use std::sync::Arc;

use domain::{CityName, ForecastBundle, GeoLocation, RecentCities, WeatherSnapshot};
use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use super::weather_gateway::WeatherGateway;
use crate::error::ApplicationError;

/// Outcome of a chained lookup
#[derive(Debug, Clone)]
pub struct WeatherReport {
    /// Current conditions (always present in a report)
    pub current: Arc<WeatherSnapshot>,
    /// Forecast for the same place, or the reason it is missing
    pub forecast: Result<Arc<ForecastBundle>, ApplicationError>,
}

impl WeatherReport {
    /// Forecast if it was retrieved
    #[must_use]
    pub fn forecast(&self) -> Option<&ForecastBundle> {
        self.forecast.as_deref().ok()
    }
}

/// One user's weather session: gateway plus recent searches
#[derive(Debug)]
pub struct WeatherSession {
    gateway: Arc<WeatherGateway>,
    recent: Mutex<RecentCities>,
}

impl WeatherSession {
    /// Start a session with an empty recent-search list
    #[must_use]
    pub fn new(gateway: Arc<WeatherGateway>, recent_capacity: usize) -> Self {
        Self::with_recent(gateway, RecentCities::new(recent_capacity))
    }

    /// Start a session seeded with previously recorded searches
    #[must_use]
    pub const fn with_recent(gateway: Arc<WeatherGateway>, recent: RecentCities) -> Self {
        Self {
            gateway,
            recent: Mutex::new(recent),
        }
    }

    /// Underlying gateway
    #[must_use]
    pub const fn gateway(&self) -> &Arc<WeatherGateway> {
        &self.gateway
    }

    /// Search by city name as typed by the user
    ///
    /// The trimmed input is added to the recent searches once current
    /// weather has been retrieved.
    ///
    /// # Errors
    ///
    /// `Domain(EmptyCityName)` for blank input; otherwise the gateway error
    /// of the current-weather lookup.
    #[instrument(skip(self))]
    pub async fn search_city(&self, input: &str) -> Result<WeatherReport, ApplicationError> {
        let city = CityName::parse(input)?;
        let current = self.gateway.get_current_by_city(&city).await?;
        self.recent.lock().record(city.as_str());

        let forecast = self.gateway.get_forecast(&current.location).await;
        Ok(Self::report(current, forecast))
    }

    /// Look up the weather at a position supplied by a location facility
    ///
    /// The place name returned by the service is added to the recent searches.
    ///
    /// # Errors
    ///
    /// The gateway error of the current-weather lookup.
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    pub async fn locate(&self, location: GeoLocation) -> Result<WeatherReport, ApplicationError> {
        let current = self.gateway.get_current_by_coords(&location).await?;
        self.recent.lock().record(&current.name);

        let forecast = self.gateway.get_forecast(&location).await;
        Ok(Self::report(current, forecast))
    }

    /// Re-run the most recent search, if there is one
    ///
    /// # Errors
    ///
    /// As for [`Self::search_city`].
    pub async fn resume(&self) -> Option<Result<WeatherReport, ApplicationError>> {
        let city = self.recent.lock().most_recent().map(str::to_owned)?;
        info!(city = %city, "Resuming most recent search");
        Some(self.search_city(&city).await)
    }

    /// Re-run the recent search at `index` (0 = newest)
    ///
    /// # Errors
    ///
    /// As for [`Self::search_city`].
    pub async fn pick_recent(
        &self,
        index: usize,
    ) -> Option<Result<WeatherReport, ApplicationError>> {
        let city = self.recent.lock().get(index).map(str::to_owned)?;
        Some(self.search_city(&city).await)
    }

    /// Snapshot of the recent searches, newest first
    #[must_use]
    pub fn recent_cities(&self) -> Vec<String> {
        self.recent.lock().iter().map(str::to_owned).collect()
    }

    fn report(
        current: Arc<WeatherSnapshot>,
        forecast: Result<Arc<ForecastBundle>, ApplicationError>,
    ) -> WeatherReport {
        if let Err(e) = &forecast {
            warn!(place = %current.name, error = %e, "Forecast unavailable, keeping current weather");
        }
        WeatherReport { current, forecast }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, Utc};
    use domain::{CacheKey, DomainError};

    use super::*;
    use crate::ports::{
        CacheEntry, CachePort, CacheStats, ClockPort, MockWeatherSourcePort, WriteOutcome,
    };

    #[derive(Debug)]
    struct FixedClock;

    impl ClockPort for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
        }
    }

    #[derive(Debug, Default)]
    struct MapCache(Mutex<HashMap<CacheKey, CacheEntry>>);

    impl CachePort for MapCache {
        fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
            self.0.lock().get(key).cloned()
        }

        fn put(&self, key: CacheKey, entry: CacheEntry) -> WriteOutcome {
            self.0.lock().insert(key, entry);
            WriteOutcome::Stored
        }

        fn len(&self) -> usize {
            self.0.lock().len()
        }

        fn stats(&self) -> CacheStats {
            CacheStats::default()
        }
    }

    fn snapshot(name: &str, location: GeoLocation) -> WeatherSnapshot {
        WeatherSnapshot {
            name: name.to_string(),
            country: None,
            observed_at: FixedClock.now(),
            temperature: 18.0,
            humidity: 55,
            wind_speed: 2.0,
            condition: None,
            location,
        }
    }

    fn empty_forecast(location: GeoLocation) -> ForecastBundle {
        ForecastBundle {
            city: None,
            country: None,
            location: Some(location),
            utc_offset_secs: 0,
            entries: vec![],
        }
    }

    fn session(source: MockWeatherSourcePort) -> WeatherSession {
        let gateway = WeatherGateway::new(
            Arc::new(source),
            Arc::new(MapCache::default()),
            Arc::new(FixedClock),
        );
        WeatherSession::new(Arc::new(gateway), 5)
    }

    #[tokio::test]
    async fn search_chains_forecast_on_reported_coordinates() {
        let mut source = MockWeatherSourcePort::new();
        source
            .expect_current_by_city()
            .returning(|c| Ok(snapshot(c.as_str(), GeoLocation::paris())));
        source
            .expect_forecast()
            .withf(|loc| *loc == GeoLocation::paris())
            .times(1)
            .returning(|loc| Ok(empty_forecast(*loc)));

        let session = session(source);
        let report = session.search_city("  Paris ").await.unwrap();

        assert_eq!(report.current.name, "Paris");
        assert!(report.forecast().is_some());
        assert_eq!(session.recent_cities(), vec!["Paris"]);
    }

    #[tokio::test]
    async fn blank_search_is_rejected_without_network() {
        let source = MockWeatherSourcePort::new();
        let session = session(source);

        let err = session.search_city("   ").await.unwrap_err();
        assert_eq!(err, ApplicationError::Domain(DomainError::EmptyCityName));
        assert!(session.recent_cities().is_empty());
    }

    #[tokio::test]
    async fn failed_search_is_not_remembered() {
        let mut source = MockWeatherSourcePort::new();
        source
            .expect_current_by_city()
            .returning(|_| Err(ApplicationError::Lookup("city not found".into())));
        let session = session(source);

        let err = session.search_city("Atlantis").await.unwrap_err();
        assert_eq!(err.to_string(), "city not found");
        assert!(session.recent_cities().is_empty());
    }

    #[tokio::test]
    async fn forecast_failure_keeps_current_weather() {
        let mut source = MockWeatherSourcePort::new();
        source
            .expect_current_by_city()
            .returning(|c| Ok(snapshot(c.as_str(), GeoLocation::london())));
        source
            .expect_forecast()
            .returning(|_| Err(ApplicationError::lookup(domain::LookupKind::Forecast, None)));
        let session = session(source);

        let report = session.search_city("London").await.unwrap();
        assert_eq!(report.current.name, "London");
        assert_eq!(
            report.forecast.unwrap_err().to_string(),
            "Forecast not available"
        );
    }

    #[tokio::test]
    async fn locate_records_reported_place_name() {
        let here = GeoLocation::new(51.5074, -0.1278).unwrap();
        let mut source = MockWeatherSourcePort::new();
        source
            .expect_current_by_coords()
            .returning(|loc| Ok(snapshot("London", *loc)));
        source
            .expect_forecast()
            .withf(move |loc| *loc == here)
            .returning(|loc| Ok(empty_forecast(*loc)));
        let session = session(source);

        let report = session.locate(here).await.unwrap();
        assert_eq!(report.current.name, "London");
        assert_eq!(session.recent_cities(), vec!["London"]);
    }

    #[tokio::test]
    async fn resume_and_pick_recent() {
        let mut source = MockWeatherSourcePort::new();
        source
            .expect_current_by_city()
            .times(2)
            .returning(|c| Ok(snapshot(c.as_str(), GeoLocation::paris())));
        source
            .expect_forecast()
            .returning(|loc| Ok(empty_forecast(*loc)));
        let session = session(source);

        assert!(session.resume().await.is_none());

        session.search_city("Paris").await.unwrap();
        session.search_city("Oslo").await.unwrap();

        // Served from cache: the mock allows only two city lookups
        let resumed = session.resume().await.unwrap().unwrap();
        assert_eq!(resumed.current.name, "Oslo");
        let picked = session.pick_recent(1).await.unwrap().unwrap();
        assert_eq!(picked.current.name, "Paris");
        assert!(session.pick_recent(7).await.is_none());
    }
}
