//! Solid vocabulary and CURIE prefix expansion

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SOLID: &str = "http://www.w3.org/ns/solid/terms#";

/// Predicates the type index resolver walks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Subject → its public type index document
    pub public_type_index: String,
    /// Type registration → registered class
    pub for_class: String,
    /// Type registration → location holding the instances
    pub instance: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            public_type_index: format!("{}publicTypeIndex", SOLID),
            for_class: format!("{}forClass", SOLID),
            instance: format!("{}instance", SOLID),
        }
    }
}

/// Prefix → namespace table for compact IRIs like `foaf:name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefixes(HashMap<String, String>);

impl Prefixes {
    /// An empty table; every identifier is used verbatim
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Add or replace a prefix
    pub fn with(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.0.insert(prefix.into(), namespace.into());
        self
    }

    /// Overlay `other` on top of this table
    pub fn merge(&mut self, other: &Prefixes) {
        for (prefix, namespace) in &other.0 {
            self.0.insert(prefix.clone(), namespace.clone());
        }
    }

    /// Expand `prefix:local` when `prefix` is known. Full IRIs, bare words
    /// and unknown prefixes come back unchanged.
    pub fn expand(&self, identifier: &str) -> String {
        match identifier.split_once(':') {
            Some((prefix, local)) if !local.starts_with("//") => match self.0.get(prefix) {
                Some(namespace) => format!("{}{}", namespace, local),
                None => identifier.to_string(),
            },
            _ => identifier.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Prefixes {
    fn default() -> Self {
        Self::empty()
            .with("solid", SOLID)
            .with("foaf", "http://xmlns.com/foaf/0.1/")
            .with("vcard", "http://www.w3.org/2006/vcard/ns#")
            .with("schema", "http://schema.org/")
            .with("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#")
            .with("rdfs", "http://www.w3.org/2000/01/rdf-schema#")
            .with("ldp", "http://www.w3.org/ns/ldp#")
            .with("dc", "http://purl.org/dc/terms/")
    }
}
