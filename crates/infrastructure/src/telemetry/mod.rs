//! Logging infrastructure
//!
//! Structured logging through `tracing` with a configurable filter and format.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, build_filter, init_tracing};
