//! Type index resolution
//!
//! A subject's public type index is a document of type registrations,
//! each pairing a class with the location that holds its instances.
//! Resolution is two hops: subject → index document → registration whose
//! class matches → instance location, whose members are the instances.

use crate::graph::{AccessResult, GraphAccessor, NodeRef, Term, Vocabulary};
use futures_util::{StreamExt, TryStreamExt};
use tracing::{debug, info};

/// Resolver scoped to one subject
pub struct TypeIndex<'a> {
    accessor: &'a dyn GraphAccessor,
    subject: NodeRef,
    vocabulary: &'a Vocabulary,
}

impl<'a> TypeIndex<'a> {
    pub fn new(accessor: &'a dyn GraphAccessor, subject: NodeRef, vocabulary: &'a Vocabulary) -> Self {
        Self {
            accessor,
            subject,
            vocabulary,
        }
    }

    pub fn subject(&self) -> &NodeRef {
        &self.subject
    }

    /// Find where instances of `class` live.
    ///
    /// The first registration (in document order) whose class string
    /// equals `class` wins. `Ok(None)` when the subject has no public type
    /// index or no registration matches.
    pub async fn location(&self, class: &str) -> AccessResult<Option<NodeRef>> {
        let Some(index) = self
            .accessor
            .get(&self.subject, &self.vocabulary.public_type_index)
            .await?
        else {
            debug!(subject = %self.subject, "no public type index");
            return Ok(None);
        };
        let index = NodeRef::new(index.to_string());
        debug!(subject = %self.subject, index = %index, class, "checking type index");

        let mut registrations = self.accessor.subjects(&index);
        while let Some(registration) = registrations.next().await {
            let registration = registration?;
            let Some(for_class) = self.accessor.get(&registration, &self.vocabulary.for_class).await? else {
                continue;
            };
            if for_class.to_string() != class {
                continue;
            }
            let Some(location) = self.accessor.get(&registration, &self.vocabulary.instance).await? else {
                debug!(registration = %registration, class, "registration has no instance location");
                continue;
            };
            let location = location_ref(&location);
            info!(class, location = %location, "type index entry found");
            return Ok(Some(location));
        }

        debug!(subject = %self.subject, class, "no type index entry for class");
        Ok(None)
    }

    /// All instances of `class` reachable through the type index, in the
    /// order the instance location enumerates them.
    ///
    /// Empty when there is no location. Errors while enumerating a found
    /// location are returned to the caller.
    pub async fn instances(&self, class: &str) -> AccessResult<Vec<NodeRef>> {
        match self.location(class).await? {
            Some(location) => self.accessor.subjects(&location).try_collect().await,
            None => {
                debug!(class, "no location found");
                Ok(Vec::new())
            }
        }
    }
}

fn location_ref(term: &Term) -> NodeRef {
    match term.as_node() {
        Some(node) => node.clone(),
        None => NodeRef::new(term.to_string()),
    }
}
