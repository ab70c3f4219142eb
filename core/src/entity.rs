//! Entity structures.
//!
//! An entity is a graph node: a unique identifier, literal-valued properties
//! and identifier-valued references to other entities.

use indexmap::IndexMap;

use crate::error::{CoreError, CoreResult};
use crate::namespace::NamespaceManager;
use crate::vocab::RDF_TYPE;
use crate::{Literal, Properties, PropertyValue, RefValue, References};

/// A node in the entity graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: String,
    /// Property values (predicate -> literal(s)).
    pub properties: Properties,
    /// Reference values (predicate -> target id(s)).
    pub references: References,
    /// Tombstone marker carried by some stores.
    pub deleted: bool,
}

impl Entity {
    /// Create an entity with no properties or references.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Create an entity with the given properties and references.
    pub fn with(id: impl Into<String>, properties: Properties, references: References) -> Self {
        Self {
            id: id.into(),
            properties,
            references,
            deleted: false,
        }
    }

    /// Set a property value, replacing any existing one.
    pub fn set_property(&mut self, predicate: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(predicate.into(), value.into());
    }

    /// Set a reference value, replacing any existing one.
    pub fn set_reference(&mut self, predicate: impl Into<String>, value: impl Into<RefValue>) {
        self.references.insert(predicate.into(), value.into());
    }

    /// Get a property slot by predicate.
    pub fn get_property(&self, predicate: &str) -> Option<&PropertyValue> {
        self.properties.get(predicate)
    }

    /// Get a reference slot by predicate.
    pub fn get_reference(&self, predicate: &str) -> Option<&RefValue> {
        self.references.get(predicate)
    }

    /// First literal at `predicate`.
    pub fn first_property(&self, predicate: &str) -> Option<&Literal> {
        self.get_property(predicate).and_then(PropertyValue::first)
    }

    /// First string literal at `predicate`.
    pub fn first_string_property(&self, predicate: &str) -> Option<&str> {
        self.first_property(predicate).and_then(Literal::as_str)
    }

    /// First integer literal at `predicate`.
    pub fn first_int_property(&self, predicate: &str) -> Option<i64> {
        self.first_property(predicate).and_then(Literal::as_int)
    }

    /// First boolean literal at `predicate`.
    pub fn first_bool_property(&self, predicate: &str) -> Option<bool> {
        self.first_property(predicate).and_then(Literal::as_bool)
    }

    /// First target at `predicate`.
    pub fn first_reference(&self, predicate: &str) -> Option<&str> {
        self.get_reference(predicate).and_then(RefValue::first)
    }

    /// All targets at `predicate`, in order.
    pub fn reference_values(&self, predicate: &str) -> Vec<&str> {
        self.get_reference(predicate)
            .map(|refs| refs.iter().collect())
            .unwrap_or_default()
    }

    /// Number of literal occurrences at `predicate` (absent counts as zero).
    pub fn property_count(&self, predicate: &str) -> usize {
        self.get_property(predicate).map_or(0, PropertyValue::count)
    }

    /// Number of targets at `predicate` (absent counts as zero).
    pub fn reference_count(&self, predicate: &str) -> usize {
        self.get_reference(predicate).map_or(0, RefValue::count)
    }

    /// Declared types of this entity (`rdf:type` targets).
    pub fn types(&self) -> Vec<&str> {
        self.reference_values(RDF_TYPE)
    }

    /// Whether `type_uri` is among the declared types.
    pub fn is_of_type(&self, type_uri: &str) -> bool {
        self.get_reference(RDF_TYPE)
            .map(|types| types.contains(type_uri))
            .unwrap_or(false)
    }

    /// Rewrite the id, every predicate and every reference target into
    /// canonical form.
    pub fn expand_namespace_prefixes(&mut self, namespaces: &NamespaceManager) -> CoreResult<()> {
        self.id = namespaces.expand(&self.id)?;

        let mut properties = Properties::with_capacity(self.properties.len());
        for (predicate, value) in self.properties.drain(..) {
            properties.insert(namespaces.expand(&predicate)?, value);
        }
        self.properties = properties;

        let mut references = References::with_capacity(self.references.len());
        for (predicate, mut value) in self.references.drain(..) {
            let mut failure = None;
            value.map_targets(|target| match namespaces.expand(target) {
                Ok(expanded) => expanded,
                Err(e) => {
                    failure.get_or_insert(e);
                    target.to_string()
                }
            });
            if let Some(e) = failure {
                return Err(e);
            }
            references.insert(namespaces.expand(&predicate)?, value);
        }
        self.references = references;

        Ok(())
    }
}

/// An ordered set of entities sharing one namespace table.
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    /// Prefix table used to expand the identifiers in this collection.
    pub namespaces: NamespaceManager,
    /// Continuation token from the document the collection was read from.
    pub continuation: Option<String>,
    entities: Vec<Entity>,
    by_id: IndexMap<String, usize>,
}

impl EntityCollection {
    /// Create an empty collection using the given namespace table.
    pub fn new(namespaces: NamespaceManager) -> Self {
        Self {
            namespaces,
            continuation: None,
            entities: Vec::new(),
            by_id: IndexMap::new(),
        }
    }

    /// Add an entity. Fails if an entity with the same id is present.
    pub fn add(&mut self, entity: Entity) -> CoreResult<()> {
        if self.by_id.contains_key(&entity.id) {
            return Err(CoreError::DuplicateEntity(entity.id));
        }
        self.by_id.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    /// Get an entity by id (exact or canonical form).
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.by_id
            .get(id)
            .or_else(|| self.by_id.get(&self.namespaces.canonical(id)))
            .map(|&i| &self.entities[i])
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Consume the collection, yielding its entities.
    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the collection has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Expand every identifier in the collection to canonical form.
    pub fn expand_namespace_prefixes(&mut self) -> CoreResult<()> {
        let mut by_id = IndexMap::with_capacity(self.entities.len());
        for (i, entity) in self.entities.iter_mut().enumerate() {
            entity.expand_namespace_prefixes(&self.namespaces)?;
            if by_id.insert(entity.id.clone(), i).is_some() {
                return Err(CoreError::DuplicateEntity(entity.id.clone()));
            }
        }
        self.by_id = by_id;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
