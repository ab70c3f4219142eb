//! Schema errors.

use lattice_core::CoreError;
use thiserror::Error;

/// Structural errors raised while building or querying a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Unknown entity class: {0}")]
    UnknownEntityClass(String),

    /// A `subClassOf` reference names a class the schema does not define.
    #[error("Missing parent class: {0}")]
    MissingParent(String),

    #[error("Cyclic class hierarchy involving: {0}")]
    CyclicHierarchy(String),

    #[error("Constraint {constraint} is missing required attribute {attribute}")]
    MissingAttribute {
        constraint: String,
        attribute: &'static str,
    },

    #[error("Constraint {constraint} has invalid cardinality (min {min}, max {max})")]
    InvalidCardinality {
        constraint: String,
        min: i64,
        max: i64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SchemaError {
    pub fn missing_attribute(constraint: impl Into<String>, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            constraint: constraint.into(),
            attribute,
        }
    }
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
