//! JWT token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, ONBOARDING_PURPOSE};
pub use decoder::JwtDecoder;
pub use encoder::{ClaimToken, JwtEncoder};
