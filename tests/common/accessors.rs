//! Accessor wrappers for exercising failure and timing paths

use async_trait::async_trait;
use solid_populate::graph::SubjectStream;
use solid_populate::{AccessError, AccessResult, GraphAccessor, MemoryGraph, NodeRef, Term};
use futures_util::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Fails lookups of chosen predicates and enumerations of chosen locations
pub struct FailingAccessor {
    inner: MemoryGraph,
    predicates: HashSet<String>,
    locations: HashSet<NodeRef>,
}

impl FailingAccessor {
    pub fn new(inner: MemoryGraph) -> Self {
        Self {
            inner,
            predicates: HashSet::new(),
            locations: HashSet::new(),
        }
    }

    pub fn fail_predicate(mut self, predicate: &str) -> Self {
        self.predicates.insert(predicate.to_string());
        self
    }

    pub fn fail_location(mut self, location: &str) -> Self {
        self.locations.insert(NodeRef::new(location));
        self
    }
}

#[async_trait]
impl GraphAccessor for FailingAccessor {
    async fn resolve_alias(&self, alias: &str) -> AccessResult<Option<NodeRef>> {
        self.inner.resolve_alias(alias).await
    }

    async fn get(&self, subject: &NodeRef, predicate: &str) -> AccessResult<Option<Term>> {
        if self.predicates.contains(predicate) {
            return Err(AccessError::Unavailable(format!("{} {}", subject, predicate)));
        }
        self.inner.get(subject, predicate).await
    }

    fn subjects<'a>(&'a self, location: &'a NodeRef) -> SubjectStream<'a> {
        if self.locations.contains(location) {
            return stream::iter(vec![Err(AccessError::Protocol(format!("500 for {}", location)))]).boxed();
        }
        self.inner.subjects(location)
    }
}

/// Holds every `get` until permits are released, reporting each entry
pub struct GatedAccessor {
    inner: Arc<MemoryGraph>,
    permits: Arc<Semaphore>,
    entered: mpsc::UnboundedSender<()>,
    gets: AtomicUsize,
}

impl GatedAccessor {
    /// Returns the accessor, the semaphore that releases lookups, and a
    /// receiver that yields once per lookup entered.
    pub fn new(inner: Arc<MemoryGraph>) -> (Self, Arc<Semaphore>, mpsc::UnboundedReceiver<()>) {
        let permits = Arc::new(Semaphore::new(0));
        let (entered, entered_rx) = mpsc::unbounded_channel();
        let accessor = Self {
            inner,
            permits: permits.clone(),
            entered,
            gets: AtomicUsize::new(0),
        };
        (accessor, permits, entered_rx)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphAccessor for GatedAccessor {
    async fn resolve_alias(&self, alias: &str) -> AccessResult<Option<NodeRef>> {
        self.inner.resolve_alias(alias).await
    }

    async fn get(&self, subject: &NodeRef, predicate: &str) -> AccessResult<Option<Term>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let _ = self.entered.send(());
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| AccessError::Unavailable("gate closed".to_string()))?;
        self.inner.get(subject, predicate).await
    }

    fn subjects<'a>(&'a self, location: &'a NodeRef) -> SubjectStream<'a> {
        self.inner.subjects(location)
    }
}

/// Counts alias resolutions
pub struct CountingAccessor {
    inner: MemoryGraph,
    aliases: AtomicUsize,
}

impl CountingAccessor {
    pub fn new(inner: MemoryGraph) -> Self {
        Self {
            inner,
            aliases: AtomicUsize::new(0),
        }
    }

    pub fn alias_lookups(&self) -> usize {
        self.aliases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphAccessor for CountingAccessor {
    async fn resolve_alias(&self, alias: &str) -> AccessResult<Option<NodeRef>> {
        self.aliases.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_alias(alias).await
    }

    async fn get(&self, subject: &NodeRef, predicate: &str) -> AccessResult<Option<Term>> {
        self.inner.get(subject, predicate).await
    }

    fn subjects<'a>(&'a self, location: &'a NodeRef) -> SubjectStream<'a> {
        self.inner.subjects(location)
    }
}
