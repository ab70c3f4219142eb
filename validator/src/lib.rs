//! Lattice Validator
//!
//! Evaluates schema constraints against entities:
//! - property and reference cardinality
//! - referential integrity and target types, through a [`DataProvider`]
//! - inverse reference cardinality
//! - class abstractness, per entity and store-wide
//! - closed-world predicate checks in strict mode
//! - caller-registered application rules
//!
//! Constraint failures are collected as [`Violations`]; a run only fails
//! with a [`ValidationError`] when it cannot be completed.
//!
//! [`DataProvider`]: lattice_graph::DataProvider

mod cancel;
mod checks;
mod error;
mod rules;
mod settings;
mod validator;
mod violation;

pub use cancel::CancellationToken;
pub use error::{ValidationError, ValidationResult};
pub use rules::{ApplicationRule, RuleContext, RuleRegistry};
pub use settings::ValidatorSettings;
pub use validator::Validator;
pub use violation::{ConstraintViolation, ViolationKind, ViolationRecord, Violations};

