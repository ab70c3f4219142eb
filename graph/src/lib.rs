//! Lattice Graph Access
//!
//! This crate defines how the validator reaches the graph store:
//! - The `DataProvider` contract: entity lookup, dataset enumeration, hop
//! - Dataset partials (`StoredEntity`, `Partial`)
//! - `MemoryStore`, an in-memory provider with type, adjacency and dataset indexes

mod error;
mod index;
mod provider;
mod store;

pub use error::*;
pub use provider::*;
pub use store::*;
