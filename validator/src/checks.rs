//! Constraint evaluation.
//!
//! One [`Checker`] serves one validation run. It dispatches each constraint
//! kind to its check and collects violations; structural problems abort the
//! run through `Err`.

use lattice_core::{vocab, Entity};
use lattice_graph::DataProvider;
use lattice_schema::{
    ApplicationConstraint, Cardinality, Constraint, PropertyConstraint, ReferenceConstraint,
    Schema, SchemaError,
};
use tracing::{trace, warn};

use crate::cancel::RunGuard;
use crate::error::{ValidationError, ValidationResult};
use crate::rules::{RuleContext, RuleRegistry};
use crate::settings::ValidatorSettings;
use crate::violation::{ConstraintViolation, ViolationKind, Violations};

/// Evaluates constraints for one validation run.
pub(crate) struct Checker<'v, 's> {
    pub schema: &'s Schema,
    pub settings: &'v ValidatorSettings,
    pub provider: Option<&'v dyn DataProvider>,
    pub rules: &'v RuleRegistry,
    pub guard: &'v RunGuard,
}

impl<'v, 's> Checker<'v, 's> {
    /// Evaluate a batch of entities, checking for cancellation between them.
    pub fn check_entities<'e>(
        &self,
        entities: impl IntoIterator<Item = &'e Entity>,
    ) -> ValidationResult<Violations<'s>> {
        let mut violations = Violations::new();
        for entity in entities {
            self.guard.check()?;
            violations.merge(self.check_entity(entity)?);
        }
        Ok(violations)
    }

    /// Evaluate every constraint that applies to the entity's declared types.
    pub fn check_entity(&self, entity: &Entity) -> ValidationResult<Violations<'s>> {
        let mut violations = Violations::new();

        let types = entity.types();
        if types.is_empty() {
            trace!(entity = %entity.id, "entity declares no type");
            return Ok(violations);
        }

        if self.settings.strict_validation {
            self.check_closed_world(entity, &mut violations);
        }

        for class_id in types {
            for constraint in self.schema.constraints_for_class(class_id, true)? {
                self.check_constraint(constraint, entity, &mut violations)?;
            }
            if self.settings.validate_related {
                for constraint in self.schema.outgoing_inverse_constraints(class_id, true)? {
                    if let Constraint::Reference(c) = constraint {
                        self.check_inverse_cardinality(constraint, c, entity, &mut violations)?;
                    }
                }
            }
        }

        Ok(violations)
    }

    fn check_constraint(
        &self,
        constraint: &'s Constraint,
        entity: &Entity,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        trace!(constraint = constraint.id(), entity = %entity.id, "evaluating constraint");
        match constraint {
            Constraint::Property(c) => self.check_property(constraint, c, entity, violations),
            Constraint::Reference(c) => self.check_reference(constraint, c, entity, violations),
            Constraint::IsAbstract(_) => self.check_abstract_local(constraint, entity, violations),
            Constraint::Application(c) => self.check_application(constraint, c, entity, violations),
        }
    }

    // ==================== Cardinality ====================

    fn check_property(
        &self,
        constraint: &'s Constraint,
        c: &PropertyConstraint,
        entity: &Entity,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        let predicate = c.property_class()?;
        let cardinality = c.cardinality()?;
        let count = self.property_count(entity, predicate);

        if cardinality.is_below(count) {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::MinPropertyOccurrenceNotMet,
                    format!(
                        "{} has {} value(s) for {}, expected at least {}",
                        entity.id, count, predicate, cardinality.min
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        if cardinality.is_above(count) {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::MaxPropertyOccurrenceExceeded,
                    format!(
                        "{} has {} value(s) for {}, expected {}",
                        entity.id, count, predicate, cardinality
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        Ok(())
    }

    fn check_reference(
        &self,
        constraint: &'s Constraint,
        c: &ReferenceConstraint,
        entity: &Entity,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        let predicate = c.reference_class()?;
        let cardinality = c.cardinality()?;
        let targets = self.reference_targets(entity, predicate);
        let count = targets.len();

        if cardinality.is_below(count) {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::MinReferenceOccurrenceNotMet,
                    format!(
                        "{} has {} reference(s) for {}, expected at least {}",
                        entity.id, count, predicate, cardinality.min
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        if cardinality.is_above(count) {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::MaxReferenceOccurrenceExceeded,
                    format!(
                        "{} has {} reference(s) for {}, expected {}",
                        entity.id, count, predicate, cardinality
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }

        if self.settings.validate_related {
            for target in targets {
                self.check_referenced_entity(constraint, c, entity, target, violations)?;
            }
        }
        Ok(())
    }

    /// Count the referrers of `entity` through the constraint's predicate.
    /// Only referrers that are instances of the constraint's class, as
    /// recorded in the datasets context, are counted.
    fn check_inverse_cardinality(
        &self,
        constraint: &'s Constraint,
        c: &ReferenceConstraint,
        entity: &Entity,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        let predicate = c.reference_class()?;
        let cardinality = c.inverse_cardinality()?;
        if cardinality == Cardinality::ANY {
            return Ok(());
        }
        let owner = constrained_class(constraint)?;

        let provider = self.provider()?;
        self.guard.check()?;
        let id = self.schema.namespaces().canonical(&entity.id);

        let mut count = 0;
        for referrer in provider.hop(&id, predicate, true, None)? {
            if self.is_counted_referrer(provider, owner, &referrer?)? {
                count += 1;
            }
            if cardinality.is_above(count) {
                break;
            }
        }

        let inverse = c.inverse_reference_class().unwrap_or(predicate);
        if cardinality.is_below(count) {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::MinInverseReferenceOccurrenceNotMet,
                    format!(
                        "{} is referenced {} time(s) through {} ({}), expected at least {}",
                        entity.id, count, predicate, inverse, cardinality.min
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        if cardinality.is_above(count) {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::MaxInverseReferenceOccurrenceExceeded,
                    format!(
                        "{} is referenced more than {} time(s) through {} ({})",
                        entity.id,
                        cardinality.max.unwrap_or(count),
                        predicate,
                        inverse
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        Ok(())
    }

    // ==================== Referential Integrity ====================

    fn check_referenced_entity(
        &self,
        constraint: &'s Constraint,
        c: &ReferenceConstraint,
        entity: &Entity,
        target: &str,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        let provider = self.provider()?;
        self.guard.check()?;
        let namespaces = self.schema.namespaces();
        let target = namespaces.canonical(target);

        let Some(stored) = provider.get_entity(&target)? else {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::ReferenceNotFound,
                    format!("{} references {}, which does not exist", entity.id, target),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
            return Ok(());
        };

        let context = &self.settings.datasets_context;
        let partials: Vec<_> = stored.partials_in(context).collect();
        if partials.is_empty() {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::ReferenceNotFound,
                    format!(
                        "{} references {}, which is not present in datasets {:?}",
                        entity.id, target, context
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
            return Ok(());
        }

        let Some(expected) = c.referenced_entity_class() else {
            return Ok(());
        };
        let matches = partials.iter().any(|partial| {
            partial
                .types()
                .into_iter()
                .any(|declared| namespaces.same(declared, expected))
        });
        if !matches {
            let found: Vec<&str> = partials.iter().flat_map(|p| p.types()).collect();
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::ReferenceTypeMismatch,
                    format!(
                        "{} references {} of type(s) {:?}, expected {}",
                        entity.id, target, found, expected
                    ),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        Ok(())
    }

    // ==================== Abstractness ====================

    /// An abstract class must never be the direct type of an entity.
    fn check_abstract_local(
        &self,
        constraint: &'s Constraint,
        entity: &Entity,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        let class_id = constrained_class(constraint)?;
        let namespaces = self.schema.namespaces();
        if entity
            .types()
            .into_iter()
            .any(|declared| namespaces.same(declared, class_id))
        {
            violations.push(
                ConstraintViolation::new(
                    ViolationKind::AbstractEntityClassViolation,
                    format!("{} is directly typed as abstract class {}", entity.id, class_id),
                )
                .with_constraint(constraint)
                .with_entity(entity),
            );
        }
        Ok(())
    }

    /// No entity anywhere in the store may be directly typed as an abstract
    /// class.
    pub fn check_abstract_global(&self, violations: &mut Violations<'s>) -> ValidationResult<()> {
        let provider = self.provider()?;
        let namespaces = self.schema.namespaces();

        for constraint in self.schema.abstract_constraints() {
            let class_id = namespaces.canonical(constrained_class(constraint)?);
            self.guard.check()?;
            trace!(class = %class_id, "checking for instances of abstract class");

            let mut instances = provider.hop(&class_id, vocab::RDF_TYPE, true, Some(1))?;
            if let Some(instance) = instances.next() {
                let instance = instance?;
                violations.push(
                    ConstraintViolation::new(
                        ViolationKind::ReferenceTypeMismatch,
                        format!(
                            "expected zero instances of abstract class {}, found {}",
                            class_id, instance.id
                        ),
                    )
                    .with_constraint(constraint),
                );
            }
        }
        Ok(())
    }

    // ==================== Application Rules ====================

    fn check_application(
        &self,
        constraint: &'s Constraint,
        c: &ApplicationConstraint,
        entity: &Entity,
        violations: &mut Violations<'s>,
    ) -> ValidationResult<()> {
        let Some(rule) = self.rules.find(self.schema, c) else {
            warn!(
                constraint = constraint.id(),
                rule = c.rule().unwrap_or("<none>"),
                "no evaluator registered for application rule"
            );
            return Ok(());
        };

        let ctx = RuleContext {
            schema: self.schema,
            constraint: c,
            settings: self.settings,
            provider: self.provider,
        };
        if let Some(message) = rule.evaluate(&ctx, entity)? {
            violations.push(
                ConstraintViolation::new(ViolationKind::ApplicationRuleViolation, message)
                    .with_constraint(constraint)
                    .with_entity(entity),
            );
        }
        Ok(())
    }

    // ==================== Closed World ====================

    fn check_closed_world(&self, entity: &Entity, violations: &mut Violations<'s>) {
        for predicate in entity.properties.keys() {
            if !self.schema.declares_property(predicate) {
                violations.push(
                    ConstraintViolation::new(
                        ViolationKind::UndeclaredProperty,
                        format!("{} has undeclared property {}", entity.id, predicate),
                    )
                    .with_entity(entity),
                );
            }
        }
        for predicate in entity.references.keys() {
            if !self.schema.declares_reference(predicate) {
                violations.push(
                    ConstraintViolation::new(
                        ViolationKind::UndeclaredReference,
                        format!("{} has undeclared reference {}", entity.id, predicate),
                    )
                    .with_entity(entity),
                );
            }
        }
    }

    // ==================== Helpers ====================

    fn is_counted_referrer(
        &self,
        provider: &dyn DataProvider,
        owner: &str,
        referrer: &Entity,
    ) -> ValidationResult<bool> {
        let context = &self.settings.datasets_context;
        if context.is_empty() {
            return self.is_instance_of(referrer.types(), owner);
        }

        self.guard.check()?;
        let id = self.schema.namespaces().canonical(&referrer.id);
        let Some(stored) = provider.get_entity(&id)? else {
            return Ok(false);
        };
        let types = stored.partials_in(context).flat_map(|p| p.types()).collect();
        self.is_instance_of(types, owner)
    }

    /// Whether any of `types` is `class_id` or one of its subclasses.
    fn is_instance_of(&self, types: Vec<&str>, class_id: &str) -> ValidationResult<bool> {
        for declared in types {
            if self.schema.is_subclass_of(declared, class_id)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn provider(&self) -> ValidationResult<&'v dyn DataProvider> {
        self.provider.ok_or(ValidationError::NoDataProvider)
    }

    /// Occurrences at `predicate`, matching keys by canonical form.
    fn property_count(&self, entity: &Entity, predicate: &str) -> usize {
        if let Some(value) = entity.get_property(predicate) {
            return value.count();
        }
        let namespaces = self.schema.namespaces();
        entity
            .properties
            .iter()
            .find(|(key, _)| namespaces.same(key, predicate))
            .map_or(0, |(_, value)| value.count())
    }

    /// Targets at `predicate`, matching keys by canonical form.
    fn reference_targets<'e>(&self, entity: &'e Entity, predicate: &str) -> Vec<&'e str> {
        if entity.get_reference(predicate).is_some() {
            return entity.reference_values(predicate);
        }
        let namespaces = self.schema.namespaces();
        entity
            .references
            .iter()
            .find(|(key, _)| namespaces.same(key, predicate))
            .map(|(_, targets)| targets.iter().collect())
            .unwrap_or_default()
    }
}

fn constrained_class(constraint: &Constraint) -> ValidationResult<&str> {
    constraint
        .entity_class()
        .ok_or_else(|| SchemaError::missing_attribute(constraint.id(), "entityClass").into())
}
