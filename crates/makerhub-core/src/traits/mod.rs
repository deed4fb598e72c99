//! Core traits defined in `makerhub-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{Mailer, OutboundMail};
