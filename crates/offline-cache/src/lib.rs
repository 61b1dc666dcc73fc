//! Versioned response caching for the offline delivery controller.
//!
//! This crate provides:
//! - `CacheStore` / `CacheHandle` - storage abstraction over named,
//!   versioned cache namespaces
//! - `MemoryStore` - in-memory implementation for tests and embedding
//! - `CacheName` / `NamespaceSet` - version-stamped namespace naming
//! - `CachedResponse` - point-in-time response snapshots

mod entry;
mod memory;
mod names;
mod store;

pub use entry::*;
pub use memory::*;
pub use names::*;
pub use store::*;
