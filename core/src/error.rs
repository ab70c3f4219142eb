//! Common error types for the entity model.

use thiserror::Error;

/// Errors that can occur while building or loading entities.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A CURIE uses a prefix with no registered expansion.
    #[error("Unknown namespace prefix '{prefix}' in identifier: {identifier}")]
    UnknownPrefix { prefix: String, identifier: String },

    /// Two entities with the same id were added to one collection.
    #[error("Duplicate entity id: {0}")]
    DuplicateEntity(String),

    /// The document does not have the expected entity-document shape.
    #[error("Malformed entity document: {0}")]
    MalformedDocument(String),

    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }
}

/// Result type for entity model operations.
pub type CoreResult<T> = Result<T, CoreError>;
