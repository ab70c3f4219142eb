//! Indexes for efficient store lookups.
//!
//! Sets are insertion-ordered so that traversal results are deterministic.

use indexmap::IndexSet;
use std::collections::HashMap;

/// Type index: class id -> Set<entity id>
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<String, IndexSet<String>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_id: &str, entity_id: &str) {
        self.index
            .entry(class_id.to_string())
            .or_default()
            .insert(entity_id.to_string());
    }

    pub fn remove(&mut self, class_id: &str, entity_id: &str) {
        if let Some(set) = self.index.get_mut(class_id) {
            set.shift_remove(entity_id);
            if set.is_empty() {
                self.index.remove(class_id);
            }
        }
    }

    pub fn get(&self, class_id: &str) -> impl Iterator<Item = &str> + '_ {
        self.index
            .get(class_id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}

/// Key for adjacency lookups: (entity id, predicate)
type EdgeKey = (String, String);

/// Adjacency index: (entity, predicate) -> { outbound targets, inbound sources }
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Targets referenced by an entity through a predicate
    outbound: HashMap<EdgeKey, IndexSet<String>>,
    /// Entities referencing an entity through a predicate
    inbound: HashMap<EdgeKey, IndexSet<String>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: &str, predicate: &str, target: &str) {
        self.outbound
            .entry((source.to_string(), predicate.to_string()))
            .or_default()
            .insert(target.to_string());
        self.inbound
            .entry((target.to_string(), predicate.to_string()))
            .or_default()
            .insert(source.to_string());
    }

    pub fn remove(&mut self, source: &str, predicate: &str, target: &str) {
        Self::remove_from(&mut self.outbound, source, predicate, target);
        Self::remove_from(&mut self.inbound, target, predicate, source);
    }

    fn remove_from(
        index: &mut HashMap<EdgeKey, IndexSet<String>>,
        key: &str,
        predicate: &str,
        value: &str,
    ) {
        let key = (key.to_string(), predicate.to_string());
        if let Some(set) = index.get_mut(&key) {
            set.shift_remove(value);
            if set.is_empty() {
                index.remove(&key);
            }
        }
    }

    /// Targets `source` references through `predicate`.
    pub fn targets_of(&self, source: &str, predicate: &str) -> impl Iterator<Item = &str> + '_ {
        self.outbound
            .get(&(source.to_string(), predicate.to_string()))
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Entities referencing `target` through `predicate`.
    pub fn sources_of(&self, target: &str, predicate: &str) -> impl Iterator<Item = &str> + '_ {
        self.inbound
            .get(&(target.to_string(), predicate.to_string()))
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}

/// Dataset index: entity id -> Set<dataset name>
#[derive(Debug, Default)]
pub struct DatasetIndex {
    index: HashMap<String, IndexSet<String>>,
}

impl DatasetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity_id: &str, dataset: &str) {
        self.index
            .entry(entity_id.to_string())
            .or_default()
            .insert(dataset.to_string());
    }

    pub fn remove(&mut self, entity_id: &str, dataset: &str) {
        if let Some(set) = self.index.get_mut(entity_id) {
            set.shift_remove(dataset);
            if set.is_empty() {
                self.index.remove(entity_id);
            }
        }
    }

    pub fn datasets_of(&self, entity_id: &str) -> impl Iterator<Item = &str> + '_ {
        self.index
            .get(entity_id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}
