//! Lattice Core Types
//!
//! This crate provides the entity graph data model shared by every other
//! lattice crate:
//! - Entity structures (Entity, EntityCollection)
//! - Literal and multi-valued slot types
//! - Namespace (CURIE) expansion
//! - The JSON entity-document loader
//! - Vocabulary URIs of the constraint language and the entity store

pub mod document;
mod entity;
mod error;
mod namespace;
mod value;
pub mod vocab;

pub use document::parse_document;
pub use entity::*;
pub use error::*;
pub use namespace::*;
pub use value::*;
