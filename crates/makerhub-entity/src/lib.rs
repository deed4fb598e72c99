//! # makerhub-entity
//!
//! Domain entity models for MakerHub. Every struct in this crate is a
//! stored document or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize`.

pub mod makerspace;
