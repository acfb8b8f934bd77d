//! reapcache - A time-bounded in-memory byte cache
//!
//! Stores opaque payloads keyed by request identifier. Every entry shares one
//! TTL and a background reaper sweeps expired entries out.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStore, TtlCache};
pub use config::{CacheConfig, Config};
pub use error::CacheError;
pub use tasks::{spawn_reaper, ReaperHandle};
