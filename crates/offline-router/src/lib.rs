//! Request classification and caching-strategy dispatch.
//!
//! This crate provides:
//! - `classify` / `ResourceClass` - pure request classification
//! - `Strategy` - network-first vs. cache-first selection
//! - `NetworkClient` - live fetch abstraction
//! - `FetchRouter` - strategy execution with fallback composition

mod classify;
mod network;
mod router;
mod strategy;

pub use classify::*;
pub use network::*;
pub use router::*;
pub use strategy::*;
