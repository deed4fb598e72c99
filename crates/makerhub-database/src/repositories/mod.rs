//! PostgreSQL repository implementations.

pub mod makerspace;

pub use makerspace::MakerspaceRepository;
