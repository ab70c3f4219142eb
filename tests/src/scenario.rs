//! Scenario definition and builder.

use std::path::{Path, PathBuf};

use lattice_core::Entity;
use lattice_validator::{RuleContext, RuleRegistry, ValidationResult, ValidatorSettings};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::Operations;
use crate::runner::Runner;

/// A step in a scenario with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (matches `--# name` in the operations file).
    pub name: String,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A complete test scenario: a schema, seeded datasets, validator settings
/// and named steps with their expected outcomes.
pub struct Scenario {
    name: String,
    schema_path: Option<PathBuf>,
    /// (dataset name, document path) in load order.
    seeds: Vec<(String, PathBuf)>,
    settings_path: Option<PathBuf>,
    settings: ValidatorSettings,
    with_provider: bool,
    rules: RuleRegistry,
    workers: usize,
    operations_path: Option<PathBuf>,
    operations: Option<Operations>,
    steps: Vec<Step>,
    /// Base path for resolving relative paths.
    base_path: PathBuf,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_path: None,
            seeds: Vec::new(),
            settings_path: None,
            settings: ValidatorSettings::default(),
            with_provider: true,
            rules: RuleRegistry::new(),
            workers: 1,
            operations_path: None,
            operations: None,
            steps: Vec::new(),
            base_path: fixtures_root(),
        }
    }

    /// Set the base path for resolving relative paths.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Schema file (relative to fixtures/). `.yaml` is compact form, `.json`
    /// an entity document.
    pub fn schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_path = Some(path.into());
        self
    }

    /// Load an entity document into a named dataset before the steps run.
    pub fn seed(mut self, dataset: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.seeds.push((dataset.into(), path.into()));
        self
    }

    /// Read validator settings from a TOML file.
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Use these settings, replacing any settings file.
    pub fn settings(mut self, settings: ValidatorSettings) -> Self {
        self.settings_path = None;
        self.settings = settings;
        self
    }

    /// Run without a data provider.
    pub fn without_provider(mut self) -> Self {
        self.with_provider = false;
        self
    }

    /// Register an application rule evaluator.
    pub fn rule<F>(mut self, rule: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &Entity) -> ValidationResult<Option<String>>
            + Send
            + Sync
            + 'static,
    {
        self.rules.register_fn(rule, evaluator);
        self
    }

    /// Validate inline documents on this many threads.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the operations file path (relative to fixtures/).
    pub fn operations(mut self, path: impl Into<PathBuf>) -> Self {
        self.operations_path = Some(path.into());
        self
    }

    /// Load operations from a string.
    pub fn operations_source(mut self, source: &str) -> ScenarioResult<Self> {
        self.operations = Some(Operations::parse(source)?);
        Ok(self)
    }

    /// Add a step with an assertion.
    ///
    /// The step name must match a `--# name` marker in the operations file.
    pub fn step<F>(mut self, name: impl Into<String>, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let name = name.into();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step { name, assertion });
        self
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<()> {
        Runner::new(self)?.run()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema_path(&self) -> ScenarioResult<PathBuf> {
        match &self.schema_path {
            Some(p) => Ok(self.resolve_path(p)),
            None => Err(ScenarioError::missing_schema(&self.name)),
        }
    }

    /// Seeds with resolved paths.
    pub fn seeds(&self) -> Vec<(&str, PathBuf)> {
        self.seeds
            .iter()
            .map(|(dataset, path)| (dataset.as_str(), self.resolve_path(path)))
            .collect()
    }

    /// The effective validator settings.
    pub fn load_settings(&self) -> ScenarioResult<ValidatorSettings> {
        let Some(ref path) = self.settings_path else {
            return Ok(self.settings.clone());
        };
        let path = self.resolve_path(path);
        let source =
            std::fs::read_to_string(&path).map_err(|e| ScenarioError::file_read(&path, e))?;
        ValidatorSettings::from_toml_str(&source)
            .map_err(|e| ScenarioError::settings(&path, e.to_string()))
    }

    pub fn has_provider(&self) -> bool {
        self.with_provider
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Get the operations, loading from file if needed.
    pub fn load_operations(&self) -> ScenarioResult<Operations> {
        if let Some(ref ops) = self.operations {
            return Ok(ops.clone());
        }
        match &self.operations_path {
            Some(p) => Operations::load(&self.resolve_path(p)),
            None => Err(ScenarioError::missing_operations(&self.name)),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

/// The `fixtures/` directory of this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .schema("hr/schema.yaml")
            .seed("people", "hr/seeds/people.json")
            .step("homer", |a| a.ok())
            .step("bart", |a| a.violations(1));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.steps().len(), 2);
        assert!(scenario.schema_path().unwrap().ends_with("fixtures/hr/schema.yaml"));
        assert_eq!(scenario.seeds()[0].0, "people");
    }

    #[test]
    fn test_missing_schema() {
        let scenario = Scenario::new("nothing");
        assert!(matches!(
            scenario.schema_path(),
            Err(ScenarioError::MissingSchema { .. })
        ));
    }
}
