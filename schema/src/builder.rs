//! SchemaBuilder for constructing an immutable Schema.
//!
//! The builder produces the same primitive entities a schema document
//! declares: one entity per class and one per constraint, each constraint
//! carrying an explicit `entityClass` back-reference. Generated constraint
//! ids have the form `<classId>-constraint-<n>` with one sequence shared by
//! the whole builder.

use lattice_core::{vocab, Entity, EntityCollection, Literal, NamespaceManager, RefValue};

use crate::error::SchemaResult;
use crate::schema::Schema;
use crate::types::ConstraintKind;

/// Builder for constructing an immutable Schema.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    /// Prefix table used to expand every identifier at build time.
    namespaces: NamespaceManager,
    /// Backing entities in declaration order.
    entities: Vec<Entity>,
    /// Next generated constraint sequence number.
    next_constraint: usize,
}

impl SchemaBuilder {
    /// Create a builder with the default `rdf` and `egcl` prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace prefix.
    pub fn namespace(
        &mut self,
        prefix: impl Into<String>,
        expansion: impl Into<String>,
    ) -> &mut Self {
        self.namespaces.store_prefix(prefix, expansion);
        self
    }

    /// Add an already-formed entity (class, constraint or plain data).
    pub fn add_entity(&mut self, entity: Entity) -> &mut Self {
        self.entities.push(entity);
        self
    }

    /// Add an entity class definition.
    pub fn add_class(&mut self, id: impl Into<String>) -> ClassBuilder<'_> {
        let mut entity = Entity::new(id);
        entity.set_reference(vocab::RDF_TYPE, vocab::ENTITY_CLASS);
        ClassBuilder {
            builder: self,
            entity,
            is_abstract: false,
        }
    }

    /// Add a property constraint on `class_id` for `property_class`.
    pub fn add_property_constraint(
        &mut self,
        class_id: &str,
        property_class: &str,
    ) -> ConstraintBuilder<'_> {
        self.add_constraint(ConstraintKind::Property, class_id)
            .property_class(property_class)
    }

    /// Add a reference constraint on `class_id` for `reference_class`.
    pub fn add_reference_constraint(
        &mut self,
        class_id: &str,
        reference_class: &str,
    ) -> ConstraintBuilder<'_> {
        self.add_constraint(ConstraintKind::Reference, class_id)
            .reference_class(reference_class)
    }

    /// Mark `class_id` abstract. Returns the generated constraint id.
    pub fn add_abstract_constraint(&mut self, class_id: &str) -> String {
        self.add_constraint(ConstraintKind::IsAbstract, class_id).done()
    }

    /// Attach an application rule to `class_id`.
    pub fn add_application_constraint(
        &mut self,
        class_id: &str,
        rule: &str,
    ) -> ConstraintBuilder<'_> {
        self.add_constraint(ConstraintKind::Application, class_id)
            .rule(rule)
    }

    /// Start a constraint of any kind with a generated id.
    ///
    /// The constraint's predicate or rule is left unset; a constraint
    /// finished without one fails when it is evaluated.
    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        class_id: &str,
    ) -> ConstraintBuilder<'_> {
        let id = format!("{}-constraint-{}", class_id, self.next_constraint);
        self.next_constraint += 1;

        let mut entity = Entity::new(id);
        entity.set_reference(vocab::RDF_TYPE, kind.type_uri());
        entity.set_reference(vocab::ENTITY_CLASS_REF, class_id);
        ConstraintBuilder {
            builder: self,
            entity,
        }
    }

    /// Build the immutable Schema, expanding every identifier.
    pub fn build(self) -> SchemaResult<Schema> {
        let mut collection = EntityCollection::new(self.namespaces);
        for entity in self.entities {
            collection.add(entity)?;
        }
        collection.expand_namespace_prefixes()?;
        Ok(Schema::from_collection(collection))
    }
}

/// Builder for an entity class definition.
pub struct ClassBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    entity: Entity,
    is_abstract: bool,
}

impl<'a> ClassBuilder<'a> {
    /// Declare superclasses. The first is the one hierarchy resolution follows.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        let parent = parent.into();
        let targets = match self.entity.references.shift_remove(vocab::SUB_CLASS_OF) {
            Some(existing) => {
                let mut targets: Vec<String> = existing.iter().map(String::from).collect();
                targets.push(parent);
                RefValue::Many(targets)
            }
            None => RefValue::One(parent),
        };
        self.entity.set_reference(vocab::SUB_CLASS_OF, targets);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        let label: String = label.into();
        self.entity.set_property(vocab::LABEL, label);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description: String = description.into();
        self.entity.set_property(vocab::DESCRIPTION, description);
        self
    }

    /// Mark the class abstract (adds an abstractness constraint).
    pub fn is_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set an extra literal property on the class entity.
    pub fn property(mut self, predicate: impl Into<String>, value: impl Into<Literal>) -> Self {
        let value: Literal = value.into();
        self.entity.set_property(predicate, value);
        self
    }

    /// Set an extra reference on the class entity.
    pub fn reference(mut self, predicate: impl Into<String>, target: impl Into<String>) -> Self {
        let target: String = target.into();
        self.entity.set_reference(predicate, target);
        self
    }

    /// Finish building this class. Returns its id as written.
    pub fn done(self) -> String {
        let id = self.entity.id.clone();
        self.builder.entities.push(self.entity);
        if self.is_abstract {
            self.builder.add_abstract_constraint(&id);
        }
        id
    }
}

/// Builder for a constraint definition.
pub struct ConstraintBuilder<'a> {
    builder: &'a mut SchemaBuilder,
    entity: Entity,
}

impl<'a> ConstraintBuilder<'a> {
    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.entity.id = id.into();
        self
    }

    /// Predicate constrained by a property constraint.
    pub fn property_class(mut self, predicate: &str) -> Self {
        self.entity.set_reference(vocab::PROPERTY_CLASS, predicate);
        self
    }

    /// Predicate constrained by a reference constraint.
    pub fn reference_class(mut self, predicate: &str) -> Self {
        self.entity.set_reference(vocab::REFERENCE_CLASS, predicate);
        self
    }

    /// Rule identifier of an application constraint.
    pub fn rule(mut self, rule: &str) -> Self {
        self.entity.set_reference(vocab::RULE, rule);
        self
    }

    /// Minimum occurrences.
    pub fn min(mut self, min: i64) -> Self {
        self.entity.set_property(vocab::MIN_CARD, min);
        self
    }

    /// Maximum occurrences; `-1` is unbounded.
    pub fn max(mut self, max: i64) -> Self {
        self.entity.set_property(vocab::MAX_CARD, max);
        self
    }

    pub fn datatype(mut self, datatype: &str) -> Self {
        self.entity.set_reference(vocab::DATATYPE, datatype);
        self
    }

    pub fn sortable(mut self) -> Self {
        self.entity.set_property(vocab::SORTABLE, true);
        self
    }

    pub fn queryable(mut self) -> Self {
        self.entity.set_property(vocab::QUERYABLE, true);
        self
    }

    pub fn unique(mut self) -> Self {
        self.entity.set_property(vocab::IS_UNIQUE, true);
        self
    }

    /// Required type of every reference target.
    pub fn target(mut self, class_id: &str) -> Self {
        self.entity.set_reference(vocab::REFERENCED_ENTITY_CLASS, class_id);
        self
    }

    /// Predicate naming the edge from the target's side.
    pub fn inverse(mut self, predicate: &str) -> Self {
        self.entity.set_reference(vocab::INVERSE_REFERENCE_CLASS, predicate);
        self
    }

    pub fn inverse_min(mut self, min: i64) -> Self {
        self.entity.set_property(vocab::INVERSE_MIN_CARD, min);
        self
    }

    pub fn inverse_max(mut self, max: i64) -> Self {
        self.entity.set_property(vocab::INVERSE_MAX_CARD, max);
        self
    }

    /// Finish building this constraint. Returns its id as written.
    pub fn done(self) -> String {
        let id = self.entity.id.clone();
        self.builder.entities.push(self.entity);
        id
    }
}
