//! # makerhub-auth
//!
//! Signed token handling for MakerHub.
//!
//! ## Modules
//!
//! - `jwt`: claim token creation and bearer token validation

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
