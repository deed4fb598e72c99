//! # makerhub-service
//!
//! Business logic service layer for MakerHub. Each service orchestrates
//! the makerspace store, token signing, and mail delivery to implement one
//! application use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod mail;
pub mod makerspace;
mod timeout;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use mail::LogMailer;
pub use makerspace::{ClaimVerification, DirectoryService, MakerspaceFinalizer, OnboardingService};
