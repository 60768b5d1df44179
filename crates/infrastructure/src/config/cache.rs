//! Response cache configuration.

use std::time::Duration;

use application::{CacheTtls, WriteOrdering};
use serde::{Deserialize, Serialize};

/// Freshness windows and write policy of the session cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness of current-weather entries in seconds (default: 10 minutes)
    #[serde(default = "default_current_ttl")]
    pub current_ttl_secs: u64,

    /// Freshness of forecast entries in seconds (default: 30 minutes)
    #[serde(default = "default_forecast_ttl")]
    pub forecast_ttl_secs: u64,

    /// Drop writes from fetches that started before the stored entry's fetch
    #[serde(default)]
    pub monotonic_writes: bool,
}

const fn default_current_ttl() -> u64 {
    10 * 60 // 10 minutes
}

const fn default_forecast_ttl() -> u64 {
    30 * 60 // 30 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            current_ttl_secs: default_current_ttl(),
            forecast_ttl_secs: default_forecast_ttl(),
            monotonic_writes: false,
        }
    }
}

impl CacheConfig {
    /// TTLs for the gateway
    #[must_use]
    pub const fn ttls(&self) -> CacheTtls {
        CacheTtls {
            current: Duration::from_secs(self.current_ttl_secs),
            forecast: Duration::from_secs(self.forecast_ttl_secs),
        }
    }

    /// Write ordering for the cache
    #[must_use]
    pub const fn write_ordering(&self) -> WriteOrdering {
        if self.monotonic_writes {
            WriteOrdering::Monotonic
        } else {
            WriteOrdering::LastWriteWins
        }
    }
}
