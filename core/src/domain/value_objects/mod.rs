//! Value objects representing immutable domain concepts.

pub mod issued_credential;

// Re-export commonly used types
pub use issued_credential::IssuedCredential;
