//! Namespace prefix expansion (CURIE handling).
//!
//! Identifiers may be written as `prefix:local` and must be expanded to their
//! canonical URI before comparison. Expansion is idempotent: a full URI is
//! returned unchanged.

use indexmap::IndexMap;

use crate::error::{CoreError, CoreResult};
use crate::vocab::DEFAULT_PREFIXES;

/// The prefix applied to identifiers that carry no prefix at all.
pub const DEFAULT_PREFIX: &str = "_";

/// Prefix -> expansion table.
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceManager {
    /// Create a manager seeded with the `rdf` and `egcl` prefixes.
    pub fn new() -> Self {
        let mut manager = Self::empty();
        for (prefix, expansion) in DEFAULT_PREFIXES {
            manager.store_prefix(prefix, expansion);
        }
        manager
    }

    /// Create a manager with no prefixes at all.
    pub fn empty() -> Self {
        Self {
            prefixes: IndexMap::new(),
        }
    }

    /// Register (or replace) a prefix expansion.
    pub fn store_prefix(&mut self, prefix: impl Into<String>, expansion: impl Into<String>) {
        self.prefixes.insert(prefix.into(), expansion.into());
    }

    /// Get the expansion registered for `prefix`.
    pub fn expansion_for(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Iterate over all (prefix, expansion) pairs in registration order.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, e)| (p.as_str(), e.as_str()))
    }

    /// Expand an identifier to its canonical URI.
    ///
    /// Fails with [`CoreError::UnknownPrefix`] when the identifier has a
    /// prefix that is not registered.
    pub fn expand(&self, identifier: &str) -> CoreResult<String> {
        if is_full_uri(identifier) {
            return Ok(identifier.to_string());
        }

        match identifier.split_once(':') {
            Some((prefix, local)) => match self.prefixes.get(prefix) {
                Some(expansion) => Ok(format!("{}{}", expansion, local)),
                None => Err(CoreError::UnknownPrefix {
                    prefix: prefix.to_string(),
                    identifier: identifier.to_string(),
                }),
            },
            None => match self.prefixes.get(DEFAULT_PREFIX) {
                Some(expansion) => Ok(format!("{}{}", expansion, identifier)),
                None => Ok(identifier.to_string()),
            },
        }
    }

    /// Lenient expansion used for comparisons: identifiers that cannot be
    /// expanded are returned unchanged.
    pub fn canonical(&self, identifier: &str) -> String {
        self.expand(identifier)
            .unwrap_or_else(|_| identifier.to_string())
    }

    /// Whether two identifiers denote the same canonical URI.
    pub fn same(&self, a: &str, b: &str) -> bool {
        a == b || self.canonical(a) == self.canonical(b)
    }

    /// Shorten a URI using the longest matching expansion.
    pub fn compact(&self, uri: &str) -> String {
        self.prefixes
            .iter()
            .filter(|(prefix, expansion)| {
                prefix.as_str() != DEFAULT_PREFIX && uri.starts_with(expansion.as_str())
            })
            .max_by_key(|(_, expansion)| expansion.len())
            .map(|(prefix, expansion)| format!("{}:{}", prefix, &uri[expansion.len()..]))
            .unwrap_or_else(|| uri.to_string())
    }
}

/// Whether an identifier is already a full URI rather than a CURIE.
pub fn is_full_uri(identifier: &str) -> bool {
    identifier.contains("://") || identifier.starts_with("urn:")
}
