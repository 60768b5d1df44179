//! Wall-clock port
//!
//! Cache freshness is computed against this clock so that TTL boundaries
//! can be exercised without sleeping.

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait ClockPort: Send + Sync + std::fmt::Debug {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}
