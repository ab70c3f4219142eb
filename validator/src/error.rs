//! Validation errors.
//!
//! An error means the run could not be completed trustworthily. Constraint
//! failures are never errors; they are collected as violations.

use lattice_graph::ProviderError;
use lattice_schema::SchemaError;
use thiserror::Error;

/// Result type for validation runs.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Structural errors that abort a validation run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Referential checks were requested but no data provider is configured.
    #[error("Related-entity validation requires a data provider")]
    NoDataProvider,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Data provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Validation cancelled")]
    Cancelled,

    #[error("Validation timed out")]
    TimedOut,

    /// An application rule evaluator failed (as opposed to reporting a violation).
    #[error("Application rule {rule} failed: {message}")]
    Rule { rule: String, message: String },

    #[error("Invalid validator settings: {0}")]
    Config(#[from] toml::de::Error),
}

impl ValidationError {
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
