//! Domain layer for skycast
//!
//! Weather payloads, location value objects, cache-key derivation and the
//! per-kind lookup policy. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
