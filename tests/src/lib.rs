//! Lattice Scenario Test Framework
//!
//! Provides a fluent API for writing integration tests against the
//! compiler and validator.
//!
//! # Structure
//!
//! Each scenario under `fixtures/` is split into:
//!
//! - **schema.yaml / schema.json** - classes and constraints
//! - **seeds/** - entity documents loaded into named datasets
//! - **operations/** - named steps (entity documents or directives)
//! - **tests/** - orchestration in Rust: schema + seeds + steps + assertions
//!
//! # Example
//!
//! ```ignore
//! use lattice_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("references")
//!         .schema("hr/schema.yaml")
//!         .seed("people", "hr/seeds/people.json")
//!         .operations("hr/operations/references.ops")
//!         .step("dangling_employer", |a| a.kind(ViolationKind::ReferenceNotFound, 1))
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod assertion;
mod error;
mod runner;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder, StepOutcome};
pub use error::{ScenarioError, ScenarioResult};
pub use loader::{Command, Operations};
pub use scenario::{Scenario, Step};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::scenario::Scenario;
    pub use lattice_validator::{ValidationError, ValidatorSettings, ViolationKind};
}
