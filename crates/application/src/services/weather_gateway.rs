//! Weather gateway
//!
//! Fetches current weather and forecasts through a `WeatherSourcePort`,
//! keeping successful responses in a session cache. Each lookup kind has
//! its own freshness window; stale entries stay in the cache until the next
//! successful fetch for the same key replaces them.
//!
//! The cache is consulted when a call starts and written when its fetch
//! completes. Two overlapping calls for the same key both reach the network
//! and the later completion wins (unless the cache enforces monotonic writes).

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{CacheKey, CityName, ForecastBundle, GeoLocation, LookupKind, WeatherSnapshot};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    CacheEntry, CachePort, CachedPayload, ClockPort, WeatherSourcePort, WriteOutcome,
};

/// Freshness windows per lookup kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// TTL for current weather (city and coordinate lookups)
    pub current: Duration,
    /// TTL for forecasts
    pub forecast: Duration,
}

impl CacheTtls {
    /// TTL governing `kind`
    #[must_use]
    pub const fn for_kind(&self, kind: LookupKind) -> Duration {
        if kind.is_current() {
            self.current
        } else {
            self.forecast
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            current: LookupKind::Coord.default_ttl(),
            forecast: LookupKind::Forecast.default_ttl(),
        }
    }
}

/// Read-side counters of the gateway
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GatewayStats {
    /// Requests answered from a fresh cache entry
    pub hits: u64,
    /// Requests with no cache entry at all
    pub misses: u64,
    /// Requests that found only a stale entry
    pub stale: u64,
    /// Remote calls that failed
    pub failures: u64,
}

impl GatewayStats {
    /// Number of remote calls issued
    #[must_use]
    pub const fn remote_calls(&self) -> u64 {
        self.misses + self.stale
    }

    /// Fraction of requests served from cache (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.remote_calls();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    failures: AtomicU64,
}

/// Cached access to current weather and forecasts
pub struct WeatherGateway {
    source: Arc<dyn WeatherSourcePort>,
    cache: Arc<dyn CachePort>,
    clock: Arc<dyn ClockPort>,
    ttls: CacheTtls,
    counters: Counters,
}

impl fmt::Debug for WeatherGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherGateway")
            .field("cache", &self.cache)
            .field("ttls", &self.ttls)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl WeatherGateway {
    /// Create a gateway with the default freshness windows
    pub fn new(
        source: Arc<dyn WeatherSourcePort>,
        cache: Arc<dyn CachePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
            ttls: CacheTtls::default(),
            counters: Counters::default(),
        }
    }

    /// Override the freshness windows
    #[must_use]
    pub const fn with_ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = ttls;
        self
    }

    /// Configured freshness windows
    #[must_use]
    pub const fn ttls(&self) -> CacheTtls {
        self.ttls
    }

    /// Current weather for a city, cached under `city_<lowercased name>`
    ///
    /// # Errors
    ///
    /// `Transport` when no response was received, `Lookup` when the service
    /// rejected the city (message from the service or "City not found"),
    /// `MalformedResponse` when a successful body could not be read.
    #[instrument(skip(self, city), fields(city = %city))]
    pub async fn get_current_by_city(
        &self,
        city: &CityName,
    ) -> Result<Arc<WeatherSnapshot>, ApplicationError> {
        let key = CacheKey::city(city);
        if let Some(CachedPayload::Current(snapshot)) = self.fresh(&key) {
            return Ok(snapshot);
        }

        let requested_at = self.clock.now();
        let result = self.source.current_by_city(city).await;
        self.complete(key, requested_at, result, CachedPayload::Current)
    }

    /// Current weather for coordinates, cached under `coord_<lat>_<lon>`
    ///
    /// # Errors
    ///
    /// As for [`Self::get_current_by_city`], with "Location not found" as
    /// the default lookup message.
    #[instrument(skip(self, location), fields(lat = location.latitude(), lon = location.longitude()))]
    pub async fn get_current_by_coords(
        &self,
        location: &GeoLocation,
    ) -> Result<Arc<WeatherSnapshot>, ApplicationError> {
        let key = CacheKey::coord(location);
        if let Some(CachedPayload::Current(snapshot)) = self.fresh(&key) {
            return Ok(snapshot);
        }

        let requested_at = self.clock.now();
        let result = self.source.current_by_coords(location).await;
        self.complete(key, requested_at, result, CachedPayload::Current)
    }

    /// Forecast for coordinates, cached under `forecast_<lat>_<lon>`
    ///
    /// # Errors
    ///
    /// As for [`Self::get_current_by_city`], with "Forecast not available"
    /// as the default lookup message.
    #[instrument(skip(self, location), fields(lat = location.latitude(), lon = location.longitude()))]
    pub async fn get_forecast(
        &self,
        location: &GeoLocation,
    ) -> Result<Arc<ForecastBundle>, ApplicationError> {
        let key = CacheKey::forecast(location);
        if let Some(CachedPayload::Forecast(forecast)) = self.fresh(&key) {
            return Ok(forecast);
        }

        let requested_at = self.clock.now();
        let result = self.source.forecast(location).await;
        self.complete(key, requested_at, result, CachedPayload::Forecast)
    }

    /// Read-side counters
    #[must_use]
    pub fn stats(&self) -> GatewayStats {
        GatewayStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            stale: self.counters.stale.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Cached payload for `key` if it is still within its kind's TTL
    fn fresh(&self, key: &CacheKey) -> Option<CachedPayload> {
        let Some(entry) = self.cache.get(key) else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache miss");
            return None;
        };

        let now = self.clock.now();
        let ttl = self.ttls.for_kind(key.kind());
        if entry.is_fresh(now, ttl) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, age_ms = entry.age(now).as_millis(), "Cache hit");
            Some(entry.payload)
        } else {
            self.counters.stale.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, age_ms = entry.age(now).as_millis(), "Cache entry stale");
            None
        }
    }

    /// Store a successful response, or log and hand back the failure
    fn complete<T>(
        &self,
        key: CacheKey,
        requested_at: DateTime<Utc>,
        result: Result<T, ApplicationError>,
        wrap: fn(Arc<T>) -> CachedPayload,
    ) -> Result<Arc<T>, ApplicationError> {
        match result {
            Ok(value) => {
                let value = Arc::new(value);
                let entry = CacheEntry {
                    payload: wrap(Arc::clone(&value)),
                    fetched_at: self.clock.now(),
                    requested_at,
                };
                match self.cache.put(key.clone(), entry) {
                    WriteOutcome::Stored => debug!(key = %key, "Cached response"),
                    WriteOutcome::Discarded => {
                        debug!(key = %key, "Newer response already cached, kept it");
                    },
                }
                Ok(value)
            },
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, kind = %key.kind(), error = %e, "Weather lookup failed");
                Err(e)
            },
        }
    }
}
