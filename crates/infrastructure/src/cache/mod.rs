//! Cache implementations
//!
//! - `InMemoryResponseCache`: session-scoped store for weather responses

mod in_memory_cache;

pub use in_memory_cache::InMemoryResponseCache;
