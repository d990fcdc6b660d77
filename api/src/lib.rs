//! # SessionGate API
//!
//! actix-web transport over the SessionGate token service. Library exports
//! exist so integration tests can build the same application the binary
//! serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
