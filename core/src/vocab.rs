//! Vocabulary URIs recognised by the schema engine.

/// RDF namespace expansion.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Constraint-language namespace expansion.
pub const SCHEMA_NS: &str = "http://data.mimiro.io/egcl/";

/// The type predicate.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// Recognised entity types
pub const ENTITY_CLASS: &str = "http://data.mimiro.io/egcl/EntityClass";
pub const PROPERTY_CONSTRAINT: &str = "http://data.mimiro.io/egcl/PropertyConstraint";
pub const REFERENCE_CONSTRAINT: &str = "http://data.mimiro.io/egcl/ReferenceConstraint";
pub const IS_ABSTRACT_CONSTRAINT: &str = "http://data.mimiro.io/egcl/IsAbstractConstraint";
pub const APPLICATION_CONSTRAINT: &str = "http://data.mimiro.io/egcl/ApplicationConstraint";

// Class attributes
pub const SUB_CLASS_OF: &str = "http://data.mimiro.io/egcl/subClassOf";
pub const LABEL: &str = "http://data.mimiro.io/egcl/label";
pub const DESCRIPTION: &str = "http://data.mimiro.io/egcl/description";

// Constraint attributes
pub const ENTITY_CLASS_REF: &str = "http://data.mimiro.io/egcl/entityClass";
pub const PROPERTY_CLASS: &str = "http://data.mimiro.io/egcl/propertyClass";
pub const REFERENCE_CLASS: &str = "http://data.mimiro.io/egcl/referenceClass";
pub const INVERSE_REFERENCE_CLASS: &str = "http://data.mimiro.io/egcl/inverseReferenceClass";
pub const REFERENCED_ENTITY_CLASS: &str = "http://data.mimiro.io/egcl/referencedEntityClass";
pub const DATATYPE: &str = "http://data.mimiro.io/egcl/datatype";
pub const MIN_CARD: &str = "http://data.mimiro.io/egcl/minCard";
pub const MAX_CARD: &str = "http://data.mimiro.io/egcl/maxCard";
pub const INVERSE_MIN_CARD: &str = "http://data.mimiro.io/egcl/inverseMinCard";
pub const INVERSE_MAX_CARD: &str = "http://data.mimiro.io/egcl/inverseMaxCard";
pub const SORTABLE: &str = "http://data.mimiro.io/egcl/sortable";
pub const QUERYABLE: &str = "http://data.mimiro.io/egcl/queryable";
pub const IS_UNIQUE: &str = "http://data.mimiro.io/egcl/isunique";
pub const RULE: &str = "http://data.mimiro.io/egcl/rule";

/// Wildcard datatype used when a property constraint names none.
pub const ANY: &str = "http://data.mimiro.io/egcl/Any";

/// Prefixes every namespace manager starts with.
pub const DEFAULT_PREFIXES: [(&str, &str); 2] = [("rdf", RDF_NS), ("egcl", SCHEMA_NS)];
