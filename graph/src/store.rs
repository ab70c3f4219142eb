//! In-memory entity store with indexed access.

use indexmap::IndexMap;
use lattice_core::{vocab, Entity, EntityCollection};
use tracing::{debug, trace};

use crate::error::{ProviderError, ProviderResult};
use crate::index::{AdjacencyIndex, DatasetIndex, TypeIndex};
use crate::provider::{DataProvider, EntityStream, Partial, StoredEntity};

/// An in-memory store of named datasets.
///
/// Each dataset holds at most one record per entity id. The same id may
/// appear in several datasets; lookups return one partial per dataset.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Dataset storage: name -> (entity id -> record)
    datasets: IndexMap<String, IndexMap<String, Entity>>,
    /// Type index over every record
    type_index: TypeIndex,
    /// Reference adjacency over every record
    adj_index: AdjacencyIndex,
    /// Entity -> datasets holding a record of it
    dataset_index: DatasetIndex,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Dataset Operations ====================

    /// Create an empty dataset. Existing datasets are left untouched.
    pub fn create_dataset(&mut self, name: impl Into<String>) {
        self.datasets.entry(name.into()).or_default();
    }

    /// Names of all datasets in creation order.
    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// Number of records in a dataset.
    pub fn dataset_len(&self, dataset: &str) -> ProviderResult<usize> {
        self.datasets
            .get(dataset)
            .map(IndexMap::len)
            .ok_or_else(|| ProviderError::UnknownDataset(dataset.to_string()))
    }

    /// Load every entity of a collection into a dataset.
    pub fn load_collection(&mut self, dataset: &str, collection: EntityCollection) {
        self.load(dataset, collection.into_entities());
    }

    /// Load entities into a dataset, creating it if needed.
    pub fn load(&mut self, dataset: &str, entities: impl IntoIterator<Item = Entity>) {
        self.create_dataset(dataset);
        let mut count = 0usize;
        for entity in entities {
            self.put(dataset, entity);
            count += 1;
        }
        debug!(dataset, count, "loaded entities into memory store");
    }

    // ==================== Entity Operations ====================

    /// Store a record in a dataset, replacing any previous record with the
    /// same id. A record marked deleted removes the previous record.
    pub fn put(&mut self, dataset: &str, entity: Entity) {
        self.remove(dataset, &entity.id);
        if entity.deleted {
            return;
        }

        self.index_record(dataset, &entity);
        self.datasets
            .entry(dataset.to_string())
            .or_default()
            .insert(entity.id.clone(), entity);
    }

    /// Remove a record from a dataset. Returns the removed record.
    pub fn remove(&mut self, dataset: &str, id: &str) -> Option<Entity> {
        let removed = self.datasets.get_mut(dataset)?.shift_remove(id)?;
        self.unindex_record(dataset, &removed);

        // Records of the same id in other datasets may share edges and types
        // with the removed one.
        let remaining: Vec<(String, Entity)> = self
            .dataset_index
            .datasets_of(id)
            .filter_map(|name| {
                self.datasets
                    .get(name)
                    .and_then(|records| records.get(id))
                    .map(|record| (name.to_string(), record.clone()))
            })
            .collect();
        for (name, record) in &remaining {
            self.index_record(name, record);
        }

        Some(removed)
    }

    /// Ids of all entities declared with `class_id` as a type.
    pub fn entities_of_type(&self, class_id: &str) -> Vec<&str> {
        self.type_index.get(class_id).collect()
    }

    fn index_record(&mut self, dataset: &str, entity: &Entity) {
        self.dataset_index.insert(&entity.id, dataset);
        for class_id in entity.types() {
            self.type_index.insert(class_id, &entity.id);
        }
        for (predicate, targets) in &entity.references {
            for target in targets.iter() {
                self.adj_index.insert(&entity.id, predicate, target);
            }
        }
    }

    fn unindex_record(&mut self, dataset: &str, entity: &Entity) {
        self.dataset_index.remove(&entity.id, dataset);
        for class_id in entity.types() {
            self.type_index.remove(class_id, &entity.id);
        }
        for (predicate, targets) in &entity.references {
            for target in targets.iter() {
                self.adj_index.remove(&entity.id, predicate, target);
            }
        }
    }

    fn stored(&self, id: &str) -> Option<StoredEntity> {
        let partials: Vec<Partial> = self
            .dataset_index
            .datasets_of(id)
            .filter_map(|name| {
                self.datasets
                    .get(name)
                    .and_then(|records| records.get(id))
                    .map(|record| Partial::new(name, record.clone()))
            })
            .collect();

        if partials.is_empty() {
            None
        } else {
            Some(StoredEntity::new(id, partials))
        }
    }
}

impl DataProvider for MemoryStore {
    fn get_entity(&self, id: &str) -> ProviderResult<Option<StoredEntity>> {
        trace!(id, "get_entity");
        Ok(self.stored(id))
    }

    fn dataset_entities(&self, dataset: &str) -> ProviderResult<EntityStream<'_>> {
        trace!(dataset, "dataset_entities");
        let records = self
            .datasets
            .get(dataset)
            .ok_or_else(|| ProviderError::UnknownDataset(dataset.to_string()))?;
        Ok(Box::new(records.values().cloned().map(Ok::<_, ProviderError>)))
    }

    fn hop(
        &self,
        source: &str,
        predicate: &str,
        inverse: bool,
        limit: Option<usize>,
    ) -> ProviderResult<EntityStream<'_>> {
        trace!(source, predicate, inverse, ?limit, "hop");
        let neighbours: Vec<&str> = if inverse && predicate == vocab::RDF_TYPE {
            self.type_index.get(source).collect()
        } else if inverse {
            self.adj_index.sources_of(source, predicate).collect()
        } else {
            self.adj_index.targets_of(source, predicate).collect()
        };

        let entities: Vec<Entity> = neighbours
            .into_iter()
            .filter_map(|id| self.stored(id))
            .map(|stored| stored.merged())
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(Box::new(entities.into_iter().map(Ok::<_, ProviderError>)))
    }
}
