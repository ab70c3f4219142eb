//! Compiler errors.

use lattice_core::CoreError;
use lattice_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur while compiling a schema document.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The first element of a compact document must declare `namespaces`.
    #[error("Compact schema document does not start with a namespaces block")]
    MissingNamespaces,

    #[error("Class block {index} has no id")]
    MissingClassId { index: usize },

    #[error("Unsupported schema source: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
