//! # makerhub-database
//!
//! The makerspace document store: the [`MakerspaceStore`] trait, its
//! PostgreSQL implementation, and an in-memory implementation used for
//! development and tests.

pub mod connection;
pub mod factory;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::connect_pool;
pub use factory::build_store;
pub use memory::MemoryMakerspaceStore;
pub use repositories::MakerspaceRepository;
pub use store::MakerspaceStore;
