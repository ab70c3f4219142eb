//! Schema definition types.
//!
//! Every definition wraps the entity that declared it. Attributes are read
//! from that entity on demand, so a malformed constraint is only reported
//! when something evaluates it.

use lattice_core::{vocab, Entity, NamespaceManager};
use std::fmt;

use crate::error::{SchemaError, SchemaResult};

/// An entity class definition.
#[derive(Debug, Clone)]
pub struct EntityClass {
    entity: Entity,
}

impl EntityClass {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn label(&self) -> Option<&str> {
        self.entity.first_string_property(vocab::LABEL)
    }

    pub fn description(&self) -> Option<&str> {
        self.entity.first_string_property(vocab::DESCRIPTION)
    }

    /// All declared superclasses, in declaration order.
    pub fn super_classes(&self) -> Vec<&str> {
        self.entity.reference_values(vocab::SUB_CLASS_OF)
    }

    /// The superclass followed by hierarchy resolution (the first declared).
    pub fn parent(&self) -> Option<&str> {
        self.entity.first_reference(vocab::SUB_CLASS_OF)
    }
}

/// Occurrence bounds. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub min: usize,
    pub max: Option<usize>,
}

impl Cardinality {
    /// Zero or more.
    pub const ANY: Cardinality = Cardinality { min: 0, max: None };

    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Read bounds as declared (`-1` max is unbounded). Absent bounds take
    /// the defaults `0` and unbounded.
    pub fn from_declared(
        constraint: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> SchemaResult<Self> {
        let min_raw = min.unwrap_or(0);
        let max_raw = max.unwrap_or(-1);
        let invalid = || SchemaError::InvalidCardinality {
            constraint: constraint.to_string(),
            min: min_raw,
            max: max_raw,
        };

        let min = usize::try_from(min_raw).map_err(|_| invalid())?;
        let max = match max_raw {
            -1 => None,
            m if m >= min_raw => Some(usize::try_from(m).map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(Self { min, max })
    }

    pub fn is_below(&self, count: usize) -> bool {
        count < self.min
    }

    pub fn is_above(&self, count: usize) -> bool {
        self.max.is_some_and(|max| count > max)
    }

    pub fn admits(&self, count: usize) -> bool {
        !self.is_below(count) && !self.is_above(count)
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::ANY
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..*]", self.min),
        }
    }
}

/// Constrains the occurrences of a property predicate.
#[derive(Debug, Clone)]
pub struct PropertyConstraint {
    entity: Entity,
}

impl PropertyConstraint {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn property_class(&self) -> SchemaResult<&str> {
        self.entity
            .first_reference(vocab::PROPERTY_CLASS)
            .or_else(|| self.entity.first_string_property(vocab::PROPERTY_CLASS))
            .ok_or_else(|| SchemaError::missing_attribute(&self.entity.id, "propertyClass"))
    }

    /// Declared datatype, or the wildcard when none is given.
    pub fn datatype(&self) -> &str {
        self.entity
            .first_reference(vocab::DATATYPE)
            .or_else(|| self.entity.first_string_property(vocab::DATATYPE))
            .unwrap_or(vocab::ANY)
    }

    pub fn cardinality(&self) -> SchemaResult<Cardinality> {
        read_cardinality(&self.entity, vocab::MIN_CARD, vocab::MAX_CARD)
    }

    pub fn sortable(&self) -> bool {
        self.flag(vocab::SORTABLE)
    }

    pub fn queryable(&self) -> bool {
        self.flag(vocab::QUERYABLE)
    }

    pub fn is_unique(&self) -> bool {
        self.flag(vocab::IS_UNIQUE)
    }

    fn flag(&self, predicate: &str) -> bool {
        self.entity.first_bool_property(predicate).unwrap_or(false)
    }
}

/// Constrains the occurrences and target type of a reference predicate.
#[derive(Debug, Clone)]
pub struct ReferenceConstraint {
    entity: Entity,
}

impl ReferenceConstraint {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn reference_class(&self) -> SchemaResult<&str> {
        self.entity
            .first_reference(vocab::REFERENCE_CLASS)
            .ok_or_else(|| SchemaError::missing_attribute(&self.entity.id, "referenceClass"))
    }

    /// Required type of every target.
    pub fn referenced_entity_class(&self) -> Option<&str> {
        self.entity.first_reference(vocab::REFERENCED_ENTITY_CLASS)
    }

    /// Predicate naming this edge from the target's side.
    pub fn inverse_reference_class(&self) -> Option<&str> {
        self.entity.first_reference(vocab::INVERSE_REFERENCE_CLASS)
    }

    pub fn cardinality(&self) -> SchemaResult<Cardinality> {
        read_cardinality(&self.entity, vocab::MIN_CARD, vocab::MAX_CARD)
    }

    pub fn inverse_cardinality(&self) -> SchemaResult<Cardinality> {
        read_cardinality(&self.entity, vocab::INVERSE_MIN_CARD, vocab::INVERSE_MAX_CARD)
    }
}

/// Marks its entity class as non-instantiable.
#[derive(Debug, Clone)]
pub struct IsAbstractConstraint {
    entity: Entity,
}

impl IsAbstractConstraint {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }
}

/// Carries a rule identifier for an externally defined check.
#[derive(Debug, Clone)]
pub struct ApplicationConstraint {
    entity: Entity,
}

impl ApplicationConstraint {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn rule(&self) -> Option<&str> {
        self.entity
            .first_reference(vocab::RULE)
            .or_else(|| self.entity.first_string_property(vocab::RULE))
    }

    /// Whether `candidate` names this constraint's rule, expanding
    /// abbreviations through `namespaces`.
    pub fn matches_rule(&self, namespaces: &NamespaceManager, candidate: &str) -> bool {
        self.rule()
            .is_some_and(|rule| namespaces.same(rule, candidate))
    }
}

fn read_cardinality(entity: &Entity, min: &str, max: &str) -> SchemaResult<Cardinality> {
    Cardinality::from_declared(
        &entity.id,
        entity.first_int_property(min),
        entity.first_int_property(max),
    )
}

/// The closed set of constraint kinds.
#[derive(Debug, Clone)]
pub enum Constraint {
    Property(PropertyConstraint),
    Reference(ReferenceConstraint),
    IsAbstract(IsAbstractConstraint),
    Application(ApplicationConstraint),
}

/// Tag naming a constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Property,
    Reference,
    IsAbstract,
    Application,
}

impl ConstraintKind {
    /// Every kind, in classification priority order.
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::Property,
        ConstraintKind::Reference,
        ConstraintKind::IsAbstract,
        ConstraintKind::Application,
    ];

    /// The type URI that declares this kind.
    pub fn type_uri(&self) -> &'static str {
        match self {
            ConstraintKind::Property => vocab::PROPERTY_CONSTRAINT,
            ConstraintKind::Reference => vocab::REFERENCE_CONSTRAINT,
            ConstraintKind::IsAbstract => vocab::IS_ABSTRACT_CONSTRAINT,
            ConstraintKind::Application => vocab::APPLICATION_CONSTRAINT,
        }
    }

    /// The kind declared by a type URI, if it is one of the four.
    pub fn from_type_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_uri() == uri)
    }
}

impl Constraint {
    /// Wrap a declaring entity as a constraint of the given kind.
    pub fn new(kind: ConstraintKind, entity: Entity) -> Self {
        match kind {
            ConstraintKind::Property => Constraint::Property(PropertyConstraint::new(entity)),
            ConstraintKind::Reference => Constraint::Reference(ReferenceConstraint::new(entity)),
            ConstraintKind::IsAbstract => Constraint::IsAbstract(IsAbstractConstraint::new(entity)),
            ConstraintKind::Application => {
                Constraint::Application(ApplicationConstraint::new(entity))
            }
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Property(_) => ConstraintKind::Property,
            Constraint::Reference(_) => ConstraintKind::Reference,
            Constraint::IsAbstract(_) => ConstraintKind::IsAbstract,
            Constraint::Application(_) => ConstraintKind::Application,
        }
    }

    /// The entity that declared this constraint.
    pub fn entity(&self) -> &Entity {
        match self {
            Constraint::Property(c) => &c.entity,
            Constraint::Reference(c) => &c.entity,
            Constraint::IsAbstract(c) => &c.entity,
            Constraint::Application(c) => &c.entity,
        }
    }

    pub fn id(&self) -> &str {
        &self.entity().id
    }

    /// Id of the class this constraint applies to.
    pub fn entity_class(&self) -> Option<&str> {
        self.entity().first_reference(vocab::ENTITY_CLASS_REF)
    }
}
