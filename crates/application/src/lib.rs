//! Application layer - Use cases and orchestration
//!
//! Holds the weather gateway (cache-first lookups), the session that chains
//! current weather into forecasts, and the port definitions that the
//! infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
