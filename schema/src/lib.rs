//! Lattice Schema
//!
//! This crate turns a collection of schema entities into an immutable,
//! queryable schema:
//! - Classification of entities into entity classes and four constraint kinds
//! - Class hierarchy resolution with missing-parent and cycle detection
//! - Constraint lookup by class, with or without inheritance
//! - A fluent builder producing the same entities a schema document would

mod builder;
mod error;
mod schema;
mod types;

pub use builder::*;
pub use error::*;
pub use schema::*;
pub use types::*;
