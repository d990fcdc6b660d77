//! Type definitions shared between crates
//!
//! - `response` - API response envelope and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse};
