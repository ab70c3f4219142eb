//! Lattice Compiler
//!
//! Transform schema source documents into an immutable Schema.
//!
//! Responsibilities:
//! - Parse the compact YAML authoring form
//! - Expand nested constraints into standalone constraint entities
//! - Load JSON entity documents that declare classes and constraints directly
//! - Expand namespace prefixes and build the Schema

mod compact;
mod compiler;
mod error;

pub use compiler::{compile, compile_document, compile_file, Compiler};
pub use error::{CompileError, CompileResult};
