//! The data provider contract consumed by referential and store-wide checks.

use lattice_core::{Entity, Properties, References};

use crate::error::ProviderResult;

/// A lazy, forward-only sequence of entities.
pub type EntityStream<'a> = Box<dyn Iterator<Item = ProviderResult<Entity>> + Send + 'a>;

/// One dataset's record of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    /// Name of the dataset holding this record.
    pub dataset: String,
    /// The record as stored in that dataset.
    pub entity: Entity,
}

impl Partial {
    pub fn new(dataset: impl Into<String>, entity: Entity) -> Self {
        Self {
            dataset: dataset.into(),
            entity,
        }
    }

    /// Types declared by this dataset's record.
    pub fn types(&self) -> Vec<&str> {
        self.entity.types()
    }
}

/// An entity as seen across every dataset that holds a record of it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntity {
    pub id: String,
    pub partials: Vec<Partial>,
}

impl StoredEntity {
    pub fn new(id: impl Into<String>, partials: Vec<Partial>) -> Self {
        Self {
            id: id.into(),
            partials,
        }
    }

    /// Partials whose dataset is in `context`. An empty context accepts all.
    pub fn partials_in<'a>(&'a self, context: &'a [String]) -> impl Iterator<Item = &'a Partial> {
        self.partials
            .iter()
            .filter(move |p| context.is_empty() || context.iter().any(|d| d == &p.dataset))
    }

    /// Fold all partials into one entity. Later partials win on
    /// conflicting predicates.
    pub fn merged(&self) -> Entity {
        let mut properties = Properties::new();
        let mut references = References::new();
        for partial in &self.partials {
            for (predicate, value) in &partial.entity.properties {
                properties.insert(predicate.clone(), value.clone());
            }
            for (predicate, value) in &partial.entity.references {
                references.insert(predicate.clone(), value.clone());
            }
        }
        Entity::with(self.id.clone(), properties, references)
    }
}

/// Access to the graph store backing referential validation.
///
/// Implementations must be safe for concurrent use: the validator may call
/// them from several worker threads at once.
pub trait DataProvider: Send + Sync {
    /// Look up an entity by canonical id. Absent is `Ok(None)`.
    fn get_entity(&self, id: &str) -> ProviderResult<Option<StoredEntity>>;

    /// Enumerate the entities of a named dataset.
    fn dataset_entities(&self, dataset: &str) -> ProviderResult<EntityStream<'_>>;

    /// One-step neighbour traversal from `source` along `predicate`.
    ///
    /// Forward yields the targets `source` references; inverse yields the
    /// entities referencing `source`.
    fn hop(
        &self,
        source: &str,
        predicate: &str,
        inverse: bool,
        limit: Option<usize>,
    ) -> ProviderResult<EntityStream<'_>>;
}
