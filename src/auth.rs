//! Client-credentials auth: redacted secrets, cached tokens, and the token cache.

pub mod cache;
pub mod secret;
pub mod token;

pub use cache::*;
pub use secret::*;
pub use token::*;
