//! Response models for the cache HTTP API
//!
//! DTOs serialized into JSON response bodies. Cached payloads themselves are
//! returned raw and never wrapped.

pub mod responses;

// Re-export commonly used types
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, SetResponse, StatsResponse};
