//! Value Objects - Immutable, identity-less domain primitives

mod cache_key;
mod city_name;
mod geo_location;
mod lookup_kind;

pub use cache_key::CacheKey;
pub use city_name::CityName;
pub use geo_location::GeoLocation;
pub use lookup_kind::LookupKind;
