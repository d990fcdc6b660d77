//! Repository interfaces for credential bookkeeping.

pub mod revocation;

pub use revocation::{InMemoryRevocationStore, RevocationStore};
