//! Route handlers
//!
//! - `token` - credential issue and refresh
//! - `data` - the public and protected data endpoints
//! - `health` - service status and the 404 fallback

pub mod data;
pub mod health;
pub mod token;
