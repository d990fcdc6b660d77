//! Domain entities representing core credential objects.

pub mod token;


// Re-export commonly used types
pub use token::{Claims, Credential, RevocationRecord, JWT_ISSUER};
