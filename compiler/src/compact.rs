//! The compact authoring form.
//!
//! A compact document is a YAML sequence. The first element declares the
//! namespace table; every later element is a class block with its
//! constraints nested inside it:
//!
//! ```yaml
//! - namespaces:
//!     ex: http://example.org/
//! - id: ex:Person
//!   superclasses: [ex:Agent]
//!   isAbstract: false
//!   propertyConstraints:
//!     - propertyClass: ex:name
//!       minCard: 1
//!       maxCard: 1
//!   referenceConstraints:
//!     - referenceClass: ex:worksFor
//!       referencedEntityClass: ex:Company
//! ```

use indexmap::IndexMap;
use lattice_core::Literal;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NamespacesBlock {
    pub namespaces: Option<IndexMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ClassBlock {
    pub id: Option<String>,
    pub superclasses: Vec<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub is_abstract: bool,
    pub props: IndexMap<String, Literal>,
    pub refs: IndexMap<String, String>,
    pub property_constraints: Vec<PropertyConstraintBlock>,
    pub reference_constraints: Vec<ReferenceConstraintBlock>,
    pub application_constraints: Vec<ApplicationConstraintBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PropertyConstraintBlock {
    pub property_class: Option<String>,
    pub datatype: Option<String>,
    pub min_card: Option<i64>,
    pub max_card: Option<i64>,
    pub sortable: bool,
    pub queryable: bool,
    pub is_unique: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReferenceConstraintBlock {
    pub reference_class: Option<String>,
    pub referenced_entity_class: Option<String>,
    pub min_card: Option<i64>,
    pub max_card: Option<i64>,
    pub inverse_reference_class: Option<String>,
    pub inverse_min_card: Option<i64>,
    pub inverse_max_card: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApplicationConstraintBlock {
    pub rule: Option<String>,
}
