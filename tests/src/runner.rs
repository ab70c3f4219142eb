//! Scenario runner.

use std::fs;
use std::sync::{Arc, Once};

use lattice_compiler::compile_file;
use lattice_core::parse_document;
use lattice_graph::MemoryStore;
use lattice_schema::Schema;
use lattice_validator::{Validator, Violations};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::assertion::StepOutcome;
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::{Command, Operations};
use crate::scenario::Scenario;

/// Runs a scenario against a fresh store and validator.
pub struct Runner<'s> {
    scenario: &'s Scenario,
    operations: Operations,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> ScenarioResult<Self> {
        let operations = scenario.load_operations()?;
        Ok(Self {
            scenario,
            operations,
        })
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<()> {
        init_tracing();

        // 1. Compile the schema
        let schema_path = self.scenario.schema_path()?;
        let schema = compile_file(&schema_path)
            .map_err(|e| ScenarioError::schema_compile(&schema_path, e.to_string()))?;

        // 2. Seed the store
        let mut store = MemoryStore::new();
        for (dataset, path) in self.scenario.seeds() {
            let source = fs::read_to_string(&path).map_err(|e| ScenarioError::file_read(&path, e))?;
            let collection = parse_document(&source)
                .map_err(|e| ScenarioError::seed_load(&path, e.to_string()))?;
            store.load_collection(dataset, collection);
        }

        // 3. Configure the validator
        let mut validator = Validator::new(self.scenario.load_settings()?);
        if self.scenario.has_provider() {
            validator = validator.with_provider(Arc::new(store));
        }
        *validator.rules_mut() = self.scenario.rules().clone();

        debug!(
            scenario = self.scenario.name(),
            steps = self.scenario.steps().len(),
            "running scenario"
        );

        // 4. Execute each step and verify its assertion
        for step in self.scenario.steps() {
            let body = self
                .operations
                .get_step(&step.name)
                .ok_or_else(|| ScenarioError::step_not_found(&step.name))?;
            let command = Command::parse(&step.name, &body)?;

            let outcome = self.execute(&validator, &schema, &step.name, command)?;
            step.assertion.verify(&step.name, &outcome, schema.namespaces())?;
        }

        Ok(())
    }

    fn execute(
        &self,
        validator: &Validator,
        schema: &Schema,
        step: &str,
        command: Command,
    ) -> ScenarioResult<StepOutcome> {
        let result = match command {
            Command::Entities(document) => {
                let collection = parse_document(&document)
                    .map_err(|e| ScenarioError::step_execution(step, e.to_string()))?;
                validator.validate_entities_parallel(
                    schema,
                    collection.entities(),
                    self.scenario.worker_count(),
                )
            }
            Command::Dataset(name) => validator.validate_dataset(schema, &name),
            Command::Schema => validator.validate_schema(schema),
        };
        Ok(result
            .as_ref()
            .map(Violations::to_records)
            .map_err(|e| e.to_string()))
    }
}

/// Route tracing output through the test harness. `RUST_LOG` selects levels.
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
