pub mod token;

pub use token::{LoginQuery, TokenContent};
