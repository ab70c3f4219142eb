//! Application rules: caller-supplied evaluators for application constraints.

use lattice_core::Entity;
use lattice_graph::DataProvider;
use lattice_schema::{ApplicationConstraint, Schema};
use std::fmt;
use std::sync::Arc;

use crate::error::ValidationResult;
use crate::settings::ValidatorSettings;

/// What an application rule can see while evaluating an entity.
pub struct RuleContext<'a> {
    pub schema: &'a Schema,
    pub constraint: &'a ApplicationConstraint,
    pub settings: &'a ValidatorSettings,
    pub provider: Option<&'a dyn DataProvider>,
}

/// An externally defined check bound to a rule identifier.
///
/// Return `Ok(Some(message))` to report a violation and `Ok(None)` to pass.
/// An `Err` aborts the run.
pub trait ApplicationRule: Send + Sync {
    fn evaluate(&self, ctx: &RuleContext<'_>, entity: &Entity) -> ValidationResult<Option<String>>;
}

impl<F> ApplicationRule for F
where
    F: Fn(&RuleContext<'_>, &Entity) -> ValidationResult<Option<String>> + Send + Sync,
{
    fn evaluate(&self, ctx: &RuleContext<'_>, entity: &Entity) -> ValidationResult<Option<String>> {
        self(ctx, entity)
    }
}

/// Registered rules keyed by rule identifier (CURIE or full URI).
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<(String, Arc<dyn ApplicationRule>)>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluator. A later registration under the same identifier
    /// shadows earlier ones.
    pub fn register(&mut self, rule: impl Into<String>, evaluator: impl ApplicationRule + 'static) {
        self.rules.insert(0, (rule.into(), Arc::new(evaluator)));
    }

    /// Register a closure as an evaluator.
    pub fn register_fn<F>(&mut self, rule: impl Into<String>, evaluator: F)
    where
        F: Fn(&RuleContext<'_>, &Entity) -> ValidationResult<Option<String>>
            + Send
            + Sync
            + 'static,
    {
        self.register(rule, evaluator);
    }

    /// The evaluator whose identifier names the constraint's rule.
    pub fn find(
        &self,
        schema: &Schema,
        constraint: &ApplicationConstraint,
    ) -> Option<&dyn ApplicationRule> {
        self.rules
            .iter()
            .find(|(id, _)| constraint.matches_rule(schema.namespaces(), id))
            .map(|(_, evaluator)| evaluator.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|(id, _)| id))
            .finish()
    }
}
