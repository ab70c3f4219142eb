//! JSON entity documents.
//!
//! A document is a JSON array. The element with id `@context` declares the
//! namespace table, an optional `@continuation` element carries a paging
//! token, and every other element is an entity:
//!
//! ```json
//! [
//!   { "id": "@context", "namespaces": { "ex": "http://example.org/" } },
//!   { "id": "ex:homer", "props": { "ex:name": "Homer" }, "refs": { "rdf:type": "ex:Person" } }
//! ]
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::entity::{Entity, EntityCollection};
use crate::error::{CoreError, CoreResult};
use crate::namespace::NamespaceManager;
use crate::{Properties, References};

const CONTEXT_ID: &str = "@context";
const CONTINUATION_ID: &str = "@continuation";

#[derive(Debug, Deserialize)]
struct ContextRecord {
    #[serde(default)]
    namespaces: indexmap::IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ContinuationRecord {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntityRecord {
    id: String,
    #[serde(default)]
    props: Properties,
    #[serde(default)]
    refs: References,
    #[serde(default)]
    deleted: bool,
}

/// Parse a JSON entity document and expand every identifier in it.
pub fn parse_document(json: &str) -> CoreResult<EntityCollection> {
    let value: Value = serde_json::from_str(json)?;
    from_value(value)
}

/// Read an entity document from an already-parsed JSON value.
pub fn from_value(value: Value) -> CoreResult<EntityCollection> {
    let Value::Array(elements) = value else {
        return Err(CoreError::malformed("document must be a JSON array"));
    };

    let mut namespaces = NamespaceManager::new();
    let mut continuation = None;
    let mut records = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        match element.get("id").and_then(Value::as_str) {
            Some(CONTEXT_ID) => {
                let context: ContextRecord = serde_json::from_value(element)?;
                for (prefix, expansion) in context.namespaces {
                    namespaces.store_prefix(prefix, expansion);
                }
            }
            Some(CONTINUATION_ID) => {
                let record: ContinuationRecord = serde_json::from_value(element)?;
                continuation = record.token;
            }
            Some(_) => records.push(serde_json::from_value::<EntityRecord>(element)?),
            None => {
                return Err(CoreError::malformed(format!(
                    "element {} has no string id",
                    index
                )))
            }
        }
    }

    let mut collection = EntityCollection::new(namespaces);
    collection.continuation = continuation;
    for record in records {
        let mut entity = Entity::with(record.id, record.props, record.refs);
        entity.deleted = record.deleted;
        collection.add(entity)?;
    }
    collection.expand_namespace_prefixes()?;

    for entity in &collection {
        if !entity.deleted && entity.types().is_empty() {
            warn!(entity = %entity.id, "entity declares no type");
        }
    }

    debug!(entities = collection.len(), "loaded entity document");
    Ok(collection)
}
