//! Kinds of weather lookup and their per-kind policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The three kinds of remote lookup the gateway performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    /// Current weather by city name
    City,
    /// Current weather by coordinates
    Coord,
    /// Three-hourly forecast by coordinates
    Forecast,
}

impl LookupKind {
    /// Cache key prefix for this kind
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Coord => "coord",
            Self::Forecast => "forecast",
        }
    }

    /// Default freshness window (10 minutes for current weather, 30 for forecasts)
    #[must_use]
    pub const fn default_ttl(self) -> Duration {
        match self {
            Self::City | Self::Coord => Duration::from_millis(600_000),
            Self::Forecast => Duration::from_millis(1_800_000),
        }
    }

    /// Message used when the service rejects the request without saying why
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::City => "City not found",
            Self::Coord => "Location not found",
            Self::Forecast => "Forecast not available",
        }
    }

    /// Whether this kind returns a current-conditions snapshot
    #[must_use]
    pub const fn is_current(self) -> bool {
        matches!(self, Self::City | Self::Coord)
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttls_match_freshness_policy() {
        assert_eq!(LookupKind::City.default_ttl().as_millis(), 600_000);
        assert_eq!(LookupKind::Coord.default_ttl().as_millis(), 600_000);
        assert_eq!(LookupKind::Forecast.default_ttl().as_millis(), 1_800_000);
    }

    #[test]
    fn not_found_messages_are_kind_specific() {
        assert_eq!(LookupKind::City.not_found_message(), "City not found");
        assert_eq!(LookupKind::Coord.not_found_message(), "Location not found");
        assert_eq!(
            LookupKind::Forecast.not_found_message(),
            "Forecast not available"
        );
    }

    #[test]
    fn prefixes_are_distinct() {
        let prefixes = [
            LookupKind::City.prefix(),
            LookupKind::Coord.prefix(),
            LookupKind::Forecast.prefix(),
        ];
        assert_ne!(prefixes[0], prefixes[1]);
        assert_ne!(prefixes[1], prefixes[2]);
        assert_ne!(prefixes[0], prefixes[2]);
    }

    #[test]
    fn is_current() {
        assert!(LookupKind::City.is_current());
        assert!(LookupKind::Coord.is_current());
        assert!(!LookupKind::Forecast.is_current());
    }
}
