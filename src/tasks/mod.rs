//! Background Tasks Module
//!
//! Contains background tasks that run alongside cache users.
//!
//! # Tasks
//! - Reaper: removes expired cache entries on a fixed period

mod reaper;

pub use reaper::{spawn_reaper, ReaperHandle, MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};
