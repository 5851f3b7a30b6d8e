//! GraphAccessor trait: the boundary to the backing linked-data store

use super::term::{NodeRef, Term};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use thiserror::Error;

/// Errors that can occur while reading the graph
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("unknown alias: {0}")]
    UnknownAlias(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid graph document: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for graph access
pub type AccessResult<T> = Result<T, AccessError>;

/// Stream of subjects yielded by a document or container enumeration
pub type SubjectStream<'a> = BoxStream<'a, AccessResult<NodeRef>>;

/// Async, read-only navigation over a linked-data graph, one hop at a time.
///
/// Implementations must be thread-safe (Send + Sync); the population
/// engine and driver share one accessor across tasks. A predicate with no
/// value is `Ok(None)`, not an error.
#[async_trait]
pub trait GraphAccessor: Send + Sync {
    /// Resolve an alias (e.g. `user`) to a node.
    ///
    /// `Ok(None)` when the alias is known but currently unbound, such as
    /// the principal alias with no active session.
    async fn resolve_alias(&self, alias: &str) -> AccessResult<Option<NodeRef>>;

    /// First value of `predicate` on `subject`
    async fn get(&self, subject: &NodeRef, predicate: &str) -> AccessResult<Option<Term>>;

    /// Enumerate the subjects described by a document or held by a container,
    /// in the order the store yields them.
    fn subjects<'a>(&'a self, location: &'a NodeRef) -> SubjectStream<'a>;
}
