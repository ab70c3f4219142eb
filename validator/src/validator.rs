//! The Validator - entry points for validation runs.

use lattice_core::{Entity, EntityCollection};
use lattice_graph::DataProvider;
use lattice_schema::Schema;
use std::fmt;
use std::sync::Arc;
use std::thread;
use tracing::debug;

use crate::cancel::{CancellationToken, RunGuard};
use crate::checks::Checker;
use crate::error::{ValidationError, ValidationResult};
use crate::rules::{ApplicationRule, RuleContext, RuleRegistry};
use crate::settings::ValidatorSettings;
use crate::violation::Violations;

/// Validates entities against a [`Schema`].
///
/// A validator holds policy, not state: the same instance may run any number
/// of validations, sequentially or from several threads.
#[derive(Clone, Default)]
pub struct Validator {
    settings: ValidatorSettings,
    provider: Option<Arc<dyn DataProvider>>,
    rules: RuleRegistry,
    cancellation: CancellationToken,
}

impl Validator {
    pub fn new(settings: ValidatorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Attach the data provider used by referential and store-wide checks.
    pub fn with_provider(mut self, provider: Arc<dyn DataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Bind an evaluator to an application rule identifier.
    pub fn with_rule(
        mut self,
        rule: impl Into<String>,
        evaluator: impl ApplicationRule + 'static,
    ) -> Self {
        self.rules.register(rule, evaluator);
        self
    }

    /// Bind a closure to an application rule identifier.
    pub fn with_rule_fn<F>(mut self, rule: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &Entity) -> ValidationResult<Option<String>>
            + Send
            + Sync
            + 'static,
    {
        self.rules.register_fn(rule, evaluator);
        self
    }

    /// Observe an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    /// A handle that cancels runs of this validator.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    // ==================== Entry Points ====================

    /// Validate one entity against the constraints of its declared types.
    pub fn validate_entity<'s>(
        &self,
        schema: &'s Schema,
        entity: &Entity,
    ) -> ValidationResult<Violations<'s>> {
        let guard = self.start();
        let checker = self.checker(schema, &guard)?;
        checker.check_entities([entity])
    }

    /// Validate entities in order. The result concatenates each entity's
    /// violations.
    pub fn validate_entities<'s>(
        &self,
        schema: &'s Schema,
        entities: &[Entity],
    ) -> ValidationResult<Violations<'s>> {
        let guard = self.start();
        let checker = self.checker(schema, &guard)?;
        debug!(entities = entities.len(), "validating entities");
        let violations = checker.check_entities(entities)?;
        debug!(violations = violations.len(), "validated entities");
        Ok(violations)
    }

    /// Validate every entity of a collection in order.
    pub fn validate_entity_collection<'s>(
        &self,
        schema: &'s Schema,
        collection: &EntityCollection,
    ) -> ValidationResult<Violations<'s>> {
        self.validate_entities(schema, collection.entities())
    }

    /// Validate entities on up to `workers` threads.
    ///
    /// The slice is split into contiguous chunks; violations come back in
    /// input order, the same as [`Validator::validate_entities`]. The first
    /// failing chunk's error is returned.
    pub fn validate_entities_parallel<'s>(
        &self,
        schema: &'s Schema,
        entities: &[Entity],
        workers: usize,
    ) -> ValidationResult<Violations<'s>> {
        let workers = workers.clamp(1, entities.len().max(1));
        if workers == 1 {
            return self.validate_entities(schema, entities);
        }

        let guard = self.start();
        let checker = self.checker(schema, &guard)?;
        let chunk_size = entities.len().div_ceil(workers);
        debug!(entities = entities.len(), workers, "validating entities in parallel");

        let results: Vec<ValidationResult<Violations<'s>>> = thread::scope(|scope| {
            let checker = &checker;
            let handles: Vec<_> = entities
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || checker.check_entities(chunk)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut violations = Violations::new();
        for result in results {
            violations.merge(result?);
        }
        debug!(violations = violations.len(), "validated entities in parallel");
        Ok(violations)
    }

    /// Validate every entity of a named dataset, then check that no stored
    /// entity is directly typed as an abstract class.
    pub fn validate_dataset<'s>(
        &self,
        schema: &'s Schema,
        dataset: &str,
    ) -> ValidationResult<Violations<'s>> {
        let guard = self.start();
        let checker = self.checker(schema, &guard)?;
        let provider = self.provider.as_deref().ok_or(ValidationError::NoDataProvider)?;
        debug!(dataset, "validating dataset");

        let mut violations = Violations::new();
        let mut count = 0usize;
        for entity in provider.dataset_entities(dataset)? {
            let entity = entity?;
            guard.check()?;
            violations.merge(checker.check_entity(&entity)?);
            count += 1;
        }
        checker.check_abstract_global(&mut violations)?;

        debug!(dataset, entities = count, violations = violations.len(), "validated dataset");
        Ok(violations)
    }

    /// Store-wide checks only: abstract classes must have no direct
    /// instances anywhere in the provider.
    pub fn validate_schema<'s>(&self, schema: &'s Schema) -> ValidationResult<Violations<'s>> {
        let guard = self.start();
        let checker = self.checker(schema, &guard)?;
        if self.provider.is_none() {
            return Err(ValidationError::NoDataProvider);
        }

        let mut violations = Violations::new();
        checker.check_abstract_global(&mut violations)?;
        debug!(violations = violations.len(), "validated schema");
        Ok(violations)
    }

    // ==================== Helpers ====================

    fn start(&self) -> RunGuard {
        RunGuard::start(self.cancellation.clone(), self.settings.timeout)
    }

    fn checker<'v, 's>(
        &'v self,
        schema: &'s Schema,
        guard: &'v RunGuard,
    ) -> ValidationResult<Checker<'v, 's>> {
        if self.settings.validate_related && self.provider.is_none() {
            return Err(ValidationError::NoDataProvider);
        }
        guard.check()?;
        Ok(Checker {
            schema,
            settings: &self.settings,
            provider: self.provider.as_deref(),
            rules: &self.rules,
            guard,
        })
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("settings", &self.settings)
            .field("provider", &self.provider.is_some())
            .field("rules", &self.rules)
            .field("cancellation", &self.cancellation)
            .finish()
    }
}
