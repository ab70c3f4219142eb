//! Error types for the scenario framework.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to read a file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse operations file.
    #[error("failed to parse operations file '{path}': {message}")]
    OperationsParse { path: PathBuf, message: String },

    /// Failed to compile the schema.
    #[error("failed to compile schema '{path}': {message}")]
    SchemaCompile { path: PathBuf, message: String },

    /// Failed to load a seed document.
    #[error("failed to load seed '{path}': {message}")]
    SeedLoad { path: PathBuf, message: String },

    /// Failed to read validator settings.
    #[error("invalid settings '{path}': {message}")]
    Settings { path: PathBuf, message: String },

    /// A step body could not be executed.
    #[error("step '{step}' failed: {message}")]
    StepExecution { step: String, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Step not found in operations file.
    #[error("step '{step}' not found in operations file")]
    StepNotFound { step: String },

    /// Missing schema.
    #[error("schema not specified for scenario '{scenario}'")]
    MissingSchema { scenario: String },

    /// Missing operations file.
    #[error("operations not specified for scenario '{scenario}'")]
    MissingOperations { scenario: String },
}

impl ScenarioError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn operations_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OperationsParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn schema_compile(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaCompile {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn seed_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SeedLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn step_execution(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepExecution {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound { step: step.into() }
    }

    pub fn missing_schema(scenario: impl Into<String>) -> Self {
        Self::MissingSchema {
            scenario: scenario.into(),
        }
    }

    pub fn missing_operations(scenario: impl Into<String>) -> Self {
        Self::MissingOperations {
            scenario: scenario.into(),
        }
    }
}
