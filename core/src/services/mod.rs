//! Business services containing domain logic and use cases.

pub mod clock;
pub mod token;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{
    ExpiryCheck, RevocationSweepConfig, RevocationSweeper, Signer, SweepResult, TokenService,
    TokenServiceConfig,
};
