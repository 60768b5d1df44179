//! Bounded list of recently searched cities

use serde::{Deserialize, Serialize};

/// Default number of cities remembered
pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// Most-recent-first list of city names, de-duplicated case-insensitively
///
/// Lives in memory only; callers that want it to survive a session are
/// free to serialize it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCities {
    capacity: usize,
    cities: Vec<String>,
}

impl RecentCities {
    /// Create an empty list holding at most `capacity` names
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            cities: Vec::new(),
        }
    }

    /// Record a city as the most recent search
    ///
    /// An existing entry with the same name (ignoring case) is moved to the
    /// front and takes the new spelling. The oldest entry is dropped once the
    /// list is over capacity.
    pub fn record(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() || self.capacity == 0 {
            return;
        }

        let folded = city.to_lowercase();
        self.cities.retain(|c| c.to_lowercase() != folded);
        self.cities.insert(0, city.to_owned());
        self.cities.truncate(self.capacity);
    }

    /// The most recently recorded city
    #[must_use]
    pub fn most_recent(&self) -> Option<&str> {
        self.cities.first().map(String::as_str)
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    /// Entry at `index` (0 = newest), as picked from a suggestion list
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cities.get(index).map(String::as_str)
    }

    /// Number of remembered cities
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Maximum number of remembered cities
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RecentCities {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}
