//! City name value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A city name as typed by the user, trimmed and guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    /// Parse raw user input into a city name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCityName` if the input is empty after trimming.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCityName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The name as entered (original casing)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for cache keys and recent-search de-duplication
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CityName> for String {
    fn from(city: CityName) -> Self {
        city.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let city = CityName::parse("  Paris \n").unwrap();
        assert_eq!(city.as_str(), "Paris");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(matches!(CityName::parse(""), Err(DomainError::EmptyCityName)));
        assert!(matches!(CityName::parse("   "), Err(DomainError::EmptyCityName)));
    }

    #[test]
    fn empty_input_message_is_user_facing() {
        let err = CityName::parse("").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a city name");
    }

    #[test]
    fn normalized_is_case_insensitive() {
        let a = CityName::parse("PARIS").unwrap();
        let b = CityName::parse("paris").unwrap();
        assert_eq!(a.normalized(), b.normalized());
        assert_ne!(a, b);
    }

    #[test]
    fn normalized_handles_unicode() {
        let city = CityName::parse("ZÜRICH").unwrap();
        assert_eq!(city.normalized(), "zürich");
    }

    #[test]
    fn deserialization_validates() {
        let ok: CityName = serde_json::from_str("\"Oslo\"").unwrap();
        assert_eq!(ok.as_str(), "Oslo");
        assert!(serde_json::from_str::<CityName>("\"  \"").is_err());
    }
}
