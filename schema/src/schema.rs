//! The Schema - immutable class and constraint lookup.

use indexmap::IndexSet;
use lattice_core::{vocab, Entity, EntityCollection, NamespaceManager};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::error::{SchemaError, SchemaResult};
use crate::types::{Constraint, ConstraintKind, EntityClass};

/// The Schema provides lookup of entity classes and their constraints.
/// It is immutable after construction; reloading means building a new one.
#[derive(Debug)]
pub struct Schema {
    /// The entities the schema was built from, classified or not.
    collection: EntityCollection,

    /// Entity class definitions.
    classes: Vec<EntityClass>,
    /// Class index by canonical id.
    class_index: HashMap<String, usize>,

    /// Constraint definitions of all four kinds.
    constraints: Vec<Constraint>,
    /// Constraints indexed by the canonical id of the class they apply to.
    constraints_by_class: HashMap<String, Vec<usize>>,
    /// Reference constraints declaring an inverse predicate, indexed by the
    /// canonical id of their target class.
    inverse_by_target: HashMap<String, Vec<usize>>,

    /// Predicates some constraint declares, for closed-world checks.
    declared_properties: HashSet<String>,
    declared_references: HashSet<String>,
}

impl Schema {
    /// Classify an expanded entity collection into classes and constraints.
    ///
    /// Entities of any other type are kept in the collection but otherwise
    /// ignored. Nothing is resolved here: dangling class references surface
    /// when a hierarchy is walked.
    pub fn from_collection(collection: EntityCollection) -> Self {
        let mut classes = Vec::new();
        let mut constraints = Vec::new();

        for entity in collection.entities() {
            match classify(&collection.namespaces, entity) {
                Some(Classified::Class) => classes.push(EntityClass::new(entity.clone())),
                Some(Classified::Constraint(kind)) => {
                    constraints.push(Constraint::new(kind, entity.clone()))
                }
                None => trace!(entity = %entity.id, "ignoring non-schema entity"),
            }
        }

        let namespaces = &collection.namespaces;

        let mut class_index = HashMap::new();
        for (i, class) in classes.iter().enumerate() {
            class_index.insert(namespaces.canonical(class.id()), i);
        }

        let mut constraints_by_class: HashMap<String, Vec<usize>> = HashMap::new();
        let mut inverse_by_target: HashMap<String, Vec<usize>> = HashMap::new();
        let mut declared_properties = HashSet::new();
        let mut declared_references = HashSet::new();

        for (i, constraint) in constraints.iter().enumerate() {
            if let Some(class_id) = constraint.entity_class() {
                constraints_by_class
                    .entry(namespaces.canonical(class_id))
                    .or_default()
                    .push(i);
            }
            match constraint {
                Constraint::Property(c) => {
                    if let Ok(predicate) = c.property_class() {
                        declared_properties.insert(namespaces.canonical(predicate));
                    }
                }
                Constraint::Reference(c) => {
                    if let Ok(predicate) = c.reference_class() {
                        declared_references.insert(namespaces.canonical(predicate));
                    }
                    if let (Some(target), Some(_)) =
                        (c.referenced_entity_class(), c.inverse_reference_class())
                    {
                        inverse_by_target
                            .entry(namespaces.canonical(target))
                            .or_default()
                            .push(i);
                    }
                }
                Constraint::IsAbstract(_) | Constraint::Application(_) => {}
            }
        }

        debug!(
            classes = classes.len(),
            constraints = constraints.len(),
            entities = collection.len(),
            "built schema"
        );

        Self {
            collection,
            classes,
            class_index,
            constraints,
            constraints_by_class,
            inverse_by_target,
            declared_properties,
            declared_references,
        }
    }

    // ==================== Accessors ====================

    /// The backing entity collection.
    pub fn collection(&self) -> &EntityCollection {
        &self.collection
    }

    /// The namespace table the schema was written with.
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.collection.namespaces
    }

    pub fn classes(&self) -> &[EntityClass] {
        &self.classes
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// All abstractness constraints, for store-wide checks.
    pub fn abstract_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.kind() == ConstraintKind::IsAbstract)
    }

    // ==================== Class Lookups ====================

    /// Get a class by id (exact or canonical form). Absent is `None`.
    pub fn entity_class(&self, id: &str) -> Option<&EntityClass> {
        self.class_index
            .get(id)
            .or_else(|| self.class_index.get(&self.namespaces().canonical(id)))
            .map(|&i| &self.classes[i])
    }

    /// Ancestor ids of a class, nearest first, following the first declared
    /// superclass at each step.
    ///
    /// Fails with [`SchemaError::MissingParent`] when a superclass is not
    /// defined and [`SchemaError::CyclicHierarchy`] when the walk revisits a
    /// class.
    pub fn class_hierarchy(&self, id: &str) -> SchemaResult<Vec<&str>> {
        let start = self
            .entity_class(id)
            .ok_or_else(|| SchemaError::UnknownEntityClass(id.to_string()))?;

        let mut visited = IndexSet::new();
        visited.insert(self.namespaces().canonical(start.id()));

        let mut chain = Vec::new();
        let mut current = start;
        while let Some(parent_id) = current.parent() {
            let parent = self
                .entity_class(parent_id)
                .ok_or_else(|| SchemaError::MissingParent(parent_id.to_string()))?;
            if !visited.insert(self.namespaces().canonical(parent.id())) {
                return Err(SchemaError::CyclicHierarchy(parent.id().to_string()));
            }
            chain.push(parent.id());
            current = parent;
        }
        Ok(chain)
    }

    /// Whether `class_id` is `ancestor` or inherits from it. A class with
    /// no definition only matches itself.
    pub fn is_subclass_of(&self, class_id: &str, ancestor: &str) -> SchemaResult<bool> {
        let namespaces = self.namespaces();
        if namespaces.same(class_id, ancestor) {
            return Ok(true);
        }
        if self.entity_class(class_id).is_none() {
            return Ok(false);
        }
        Ok(self
            .class_hierarchy(class_id)?
            .into_iter()
            .any(|parent| namespaces.same(parent, ancestor)))
    }

    // ==================== Constraint Lookups ====================

    /// Constraints whose `entityClass` is `class_id`.
    ///
    /// With `inherited`, the direct constraints of every ancestor follow,
    /// nearest ancestor first. Nothing is deduplicated. A class id with no
    /// definition yields its direct constraints only.
    pub fn constraints_for_class(
        &self,
        class_id: &str,
        inherited: bool,
    ) -> SchemaResult<Vec<&Constraint>> {
        let mut result = self.direct_constraints(class_id);
        if inherited && self.entity_class(class_id).is_some() {
            for ancestor in self.class_hierarchy(class_id)? {
                result.extend(self.direct_constraints(ancestor));
            }
        }
        Ok(result)
    }

    /// Reference constraints whose target class is `class_id` and which
    /// declare an inverse predicate, with the same inheritance rule as
    /// [`Schema::constraints_for_class`]. Every element is a
    /// [`Constraint::Reference`].
    pub fn outgoing_inverse_constraints(
        &self,
        class_id: &str,
        inherited: bool,
    ) -> SchemaResult<Vec<&Constraint>> {
        let mut result = self.direct_inverse_constraints(class_id);
        if inherited && self.entity_class(class_id).is_some() {
            for ancestor in self.class_hierarchy(class_id)? {
                result.extend(self.direct_inverse_constraints(ancestor));
            }
        }
        Ok(result)
    }

    /// Whether the class's direct constraints include an abstractness marker.
    pub fn is_abstract(&self, class_id: &str) -> bool {
        self.direct_constraints(class_id)
            .iter()
            .any(|c| c.kind() == ConstraintKind::IsAbstract)
    }

    /// Whether some property constraint constrains `predicate`.
    pub fn declares_property(&self, predicate: &str) -> bool {
        self.declared_properties
            .contains(&self.namespaces().canonical(predicate))
    }

    /// Whether some reference constraint constrains `predicate`.
    pub fn declares_reference(&self, predicate: &str) -> bool {
        predicate == vocab::RDF_TYPE
            || self
                .declared_references
                .contains(&self.namespaces().canonical(predicate))
    }

    fn direct_constraints(&self, class_id: &str) -> Vec<&Constraint> {
        self.constraints_by_class
            .get(&self.namespaces().canonical(class_id))
            .map(|indices| indices.iter().map(|&i| &self.constraints[i]).collect())
            .unwrap_or_default()
    }

    fn direct_inverse_constraints(&self, class_id: &str) -> Vec<&Constraint> {
        self.inverse_by_target
            .get(&self.namespaces().canonical(class_id))
            .map(|indices| indices.iter().map(|&i| &self.constraints[i]).collect())
            .unwrap_or_default()
    }
}

enum Classified {
    Class,
    Constraint(ConstraintKind),
}

/// Classify an entity by its declared types. An entity carrying several
/// recognised types takes the first in the order EntityClass, Property,
/// Reference, IsAbstract, Application.
fn classify(namespaces: &NamespaceManager, entity: &Entity) -> Option<Classified> {
    let declared: Vec<String> = entity
        .types()
        .into_iter()
        .map(|t| namespaces.canonical(t))
        .collect();
    let declares = |uri: &str| declared.iter().any(|t| t == uri);

    if declares(vocab::ENTITY_CLASS) {
        return Some(Classified::Class);
    }
    ConstraintKind::ALL
        .into_iter()
        .find(|kind| declares(kind.type_uri()))
        .map(Classified::Constraint)
}
