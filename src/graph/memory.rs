//! MemoryGraph: an in-process linked-data store
//!
//! Backs the CLI and the test fixtures. Subjects carry multi-valued
//! properties; documents and containers list their member subjects in
//! insertion order, which is the order `subjects()` yields them.

use super::accessor::{AccessError, AccessResult, GraphAccessor, SubjectStream};
use super::term::{NodeRef, Term};
use super::vocab::Prefixes;
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::stream::{self, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Alias the session principal is registered under unless configured otherwise
pub const DEFAULT_PRINCIPAL_ALIAS: &str = "user";

/// One value or a list of values for a predicate
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Term),
    Many(Vec<Term>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Term> {
        match self {
            Self::One(term) => vec![term],
            Self::Many(terms) => terms,
        }
    }
}

/// On-disk form of a graph (YAML or JSON)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphDocument {
    principal: Option<String>,
    aliases: HashMap<String, String>,
    subjects: indexmap::IndexMap<String, indexmap::IndexMap<String, OneOrMany>>,
    documents: indexmap::IndexMap<String, Vec<String>>,
}

/// In-memory graph implementing `GraphAccessor`
///
/// Mutable through `&self`, so a graph shared behind an `Arc` can change
/// between population runs.
#[derive(Debug)]
pub struct MemoryGraph {
    /// subject → predicate → values
    subjects: DashMap<NodeRef, HashMap<String, Vec<Term>>>,
    /// document or container → member subjects, in order
    documents: DashMap<NodeRef, Vec<NodeRef>>,
    /// alias → node; the principal lives under `principal_alias`
    aliases: DashMap<String, NodeRef>,
    principal_alias: String,
}

impl MemoryGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            subjects: DashMap::new(),
            documents: DashMap::new(),
            aliases: DashMap::new(),
            principal_alias: DEFAULT_PRINCIPAL_ALIAS.to_string(),
        }
    }

    /// Answer to `alias` for the principal instead, keeping any binding
    pub fn with_principal_alias(mut self, alias: impl Into<String>) -> Self {
        let principal = self.principal();
        self.set_principal(None);
        self.principal_alias = alias.into();
        self.set_principal(principal);
        self
    }

    /// Parse a YAML (or JSON, which is YAML) graph document, expanding
    /// compact IRIs through `prefixes`.
    pub fn from_yaml_str(source: &str, prefixes: &Prefixes) -> AccessResult<Self> {
        let doc: GraphDocument = serde_yaml::from_str(source)?;
        Ok(Self::from_document(doc, prefixes))
    }

    /// Load a graph document from disk
    pub fn load(path: impl AsRef<Path>, prefixes: &Prefixes) -> AccessResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source, prefixes)
    }

    fn from_document(doc: GraphDocument, prefixes: &Prefixes) -> Self {
        let graph = Self::new();
        let node = |s: &str| NodeRef::new(prefixes.expand(s));

        for (subject, properties) in doc.subjects {
            let subject = node(&subject);
            for (predicate, values) in properties {
                let predicate = prefixes.expand(&predicate);
                for term in values.into_vec() {
                    let term = match term {
                        Term::Node { id } => Term::from(node(id.as_str())),
                        literal => literal,
                    };
                    graph.insert(subject.clone(), predicate.clone(), term);
                }
            }
        }
        for (document, members) in doc.documents {
            let document = node(&document);
            graph.documents.entry(document.clone()).or_default();
            for member in members {
                graph.add_member(document.clone(), node(&member));
            }
        }
        for (alias, target) in doc.aliases {
            graph.aliases.insert(alias, node(&target));
        }
        if let Some(principal) = doc.principal {
            graph.set_principal(Some(node(&principal)));
        }
        graph
    }

    /// Add a value to a subject's predicate
    pub fn insert(&self, subject: impl Into<NodeRef>, predicate: impl Into<String>, value: Term) {
        self.subjects
            .entry(subject.into())
            .or_default()
            .entry(predicate.into())
            .or_default()
            .push(value);
    }

    /// Replace all values of a subject's predicate
    pub fn set(&self, subject: impl Into<NodeRef>, predicate: impl Into<String>, value: Term) {
        self.subjects
            .entry(subject.into())
            .or_default()
            .insert(predicate.into(), vec![value]);
    }

    /// Append a member subject to a document or container
    pub fn add_member(&self, location: impl Into<NodeRef>, member: impl Into<NodeRef>) {
        self.documents.entry(location.into()).or_default().push(member.into());
    }

    /// Register an alias
    pub fn alias(&self, name: impl Into<String>, target: impl Into<NodeRef>) {
        self.aliases.insert(name.into(), target.into());
    }

    /// Bind or clear the session principal
    pub fn set_principal(&self, principal: Option<NodeRef>) {
        match principal {
            Some(node) => {
                self.aliases.insert(self.principal_alias.clone(), node);
            }
            None => {
                self.aliases.remove(&self.principal_alias);
            }
        }
    }

    /// The current principal, if bound
    pub fn principal(&self) -> Option<NodeRef> {
        self.aliases.get(&self.principal_alias).map(|r| r.clone())
    }

    /// All values of a subject's predicate
    pub fn values(&self, subject: &NodeRef, predicate: &str) -> Vec<Term> {
        self.subjects
            .get(subject)
            .and_then(|props| props.get(predicate).cloned())
            .unwrap_or_default()
    }

    /// Number of subjects with at least one property
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Check if a document or container is known
    pub fn has_location(&self, location: &NodeRef) -> bool {
        self.documents.contains_key(location)
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphAccessor for MemoryGraph {
    async fn resolve_alias(&self, alias: &str) -> AccessResult<Option<NodeRef>> {
        if let Some(node) = self.aliases.get(alias) {
            return Ok(Some(node.clone()));
        }
        if alias == self.principal_alias {
            // Known alias, no session bound
            return Ok(None);
        }
        Err(AccessError::UnknownAlias(alias.to_string()))
    }

    async fn get(&self, subject: &NodeRef, predicate: &str) -> AccessResult<Option<Term>> {
        Ok(self
            .subjects
            .get(subject)
            .and_then(|props| props.get(predicate).and_then(|values| values.first().cloned())))
    }

    fn subjects<'a>(&'a self, location: &'a NodeRef) -> SubjectStream<'a> {
        match self.documents.get(location) {
            Some(members) => {
                let members: Vec<NodeRef> = members.clone();
                stream::iter(members.into_iter().map(Ok)).boxed()
            }
            None => stream::iter(vec![Err(AccessError::Unavailable(format!(
                "no such document: {}",
                location
            )))])
            .boxed(),
        }
    }
}
