//! # makerhub-core
//!
//! Core crate for MakerHub. Contains configuration schemas, the unified
//! error system, and the collaborator traits implemented elsewhere.
//!
//! This crate has **no** internal dependencies on other MakerHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
