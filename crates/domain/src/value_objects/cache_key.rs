//! Cache key derivation for weather lookups
//!
//! Keys are tagged with the lookup kind so that city weather, coordinate
//! weather and forecasts for the same place never share a slot:
//!
//! ```
//! use domain::value_objects::{CacheKey, CityName, GeoLocation};
//!
//! let city = CityName::parse("Paris").unwrap();
//! assert_eq!(CacheKey::city(&city).as_str(), "city_paris");
//!
//! let paris = GeoLocation::new(48.8566, 2.3522).unwrap();
//! assert_eq!(CacheKey::forecast(&paris).as_str(), "forecast_48.8566_2.3522");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CityName, GeoLocation, LookupKind};

/// Deterministic identifier of a unique weather request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    kind: LookupKind,
    key: String,
}

impl CacheKey {
    /// Key for current weather by city: `city_<lowercased name>`
    #[must_use]
    pub fn city(city: &CityName) -> Self {
        Self {
            kind: LookupKind::City,
            key: format!("{}_{}", LookupKind::City.prefix(), city.normalized()),
        }
    }

    /// Key for current weather by coordinates: `coord_<lat>_<lon>`
    #[must_use]
    pub fn coord(location: &GeoLocation) -> Self {
        Self::for_location(LookupKind::Coord, location)
    }

    /// Key for a forecast by coordinates: `forecast_<lat>_<lon>`
    #[must_use]
    pub fn forecast(location: &GeoLocation) -> Self {
        Self::for_location(LookupKind::Forecast, location)
    }

    fn for_location(kind: LookupKind, location: &GeoLocation) -> Self {
        Self {
            kind,
            key: format!(
                "{}_{}_{}",
                kind.prefix(),
                coordinate_component(location.latitude()),
                coordinate_component(location.longitude())
            ),
        }
    }

    /// The lookup kind this key belongs to
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        self.kind
    }

    /// The rendered key string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

/// Exact (unrounded) rendering of a coordinate.
///
/// Adding `0.0` folds `-0.0` into `0.0` so both spellings of zero share a key.
fn coordinate_component(value: f64) -> f64 {
    value + 0.0
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}
