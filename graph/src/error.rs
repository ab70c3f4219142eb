//! Data provider errors.

use lattice_core::CoreError;
use thiserror::Error;

/// Errors raised by a data provider.
///
/// An absent entity is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// I/O or protocol failure of a remote implementation.
    #[error("Data provider backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ProviderError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Result type for data provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
