//! Populator: resolves a schema against the graph

use super::resolved::{Resolved, ResolvedObject, ResolvedTree};
use crate::graph::{AccessError, GraphAccessor, NodeRef, Prefixes, SubjectRef, Vocabulary};
use crate::schema::{FieldMap, PropertySpec, Schema};
use crate::type_index::TypeIndex;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised while resolving a single field
///
/// Never escape `populate`: the owning field is left absent instead.
#[derive(Debug, Error)]
pub enum PopulateError {
    #[error("graph access failed: {0}")]
    Access(#[from] AccessError),

    #[error("subject `{0}` does not resolve to a node")]
    UnresolvedSubject(String),
}

/// Result type for field resolution
pub type PopulateResult<T> = Result<T, PopulateError>;

/// Recursive population engine
///
/// Fields are resolved one after another in schema order. Each field is
/// an independent unit: its failure is logged and leaves it absent, and
/// never affects siblings or the enclosing object.
#[derive(Clone)]
pub struct Populator {
    accessor: Arc<dyn GraphAccessor>,
    vocabulary: Vocabulary,
    prefixes: Prefixes,
}

impl Populator {
    /// Create a populator with the Solid vocabulary and default prefixes
    pub fn new(accessor: Arc<dyn GraphAccessor>) -> Self {
        Self {
            accessor,
            vocabulary: Vocabulary::default(),
            prefixes: Prefixes::default(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_prefixes(mut self, prefixes: Prefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn accessor(&self) -> &Arc<dyn GraphAccessor> {
        &self.accessor
    }

    /// Populate every field of a schema into a fresh tree
    ///
    /// Authored node subjects are prefix-expanded here, once.
    pub async fn populate_schema(&self, schema: &Schema) -> ResolvedTree {
        let mut tree = ResolvedTree::new();
        for (name, field) in schema.fields() {
            let subject = self.expand_subject(&field.subject);
            debug!(field = %name, subject = %subject, "populating schema field");
            let object = self.populate(&subject, &field.properties).await;
            tree.insert(name.clone(), object);
        }
        tree
    }

    /// Populate `properties` for one subject.
    ///
    /// An alias subject is resolved once per call; a node subject is used
    /// as given. The result has exactly the keys of `properties`, in order.
    pub fn populate<'a>(
        &'a self,
        subject: &'a SubjectRef,
        properties: &'a FieldMap,
    ) -> BoxFuture<'a, ResolvedObject> {
        Box::pin(async move {
            let node = match self.resolve_subject(subject).await {
                Ok(node) => Some(node),
                Err(e) => {
                    error!(subject = %subject, error = %e, "cannot resolve subject");
                    None
                }
            };

            let mut object = ResolvedObject::new();
            for (name, spec) in properties {
                let value = match (spec, &node) {
                    (PropertySpec::Unsupported(raw), _) => {
                        warn!(field = %name, spec = %raw, "unsupported property spec, using null");
                        Resolved::Null
                    }
                    (_, None) => Resolved::Absent,
                    (_, Some(node)) => match self.resolve_field(node, spec).await {
                        Ok(value) => value,
                        Err(e) => {
                            error!(field = %name, subject = %node, error = %e, "field resolution failed");
                            Resolved::Absent
                        }
                    },
                };
                object.insert(name.clone(), value);
            }
            object
        })
    }

    fn expand_subject(&self, subject: &SubjectRef) -> SubjectRef {
        match subject {
            SubjectRef::Node(node) => SubjectRef::Node(NodeRef::new(self.prefixes.expand(node.as_str()))),
            SubjectRef::Alias(_) => subject.clone(),
        }
    }

    async fn resolve_subject(&self, subject: &SubjectRef) -> PopulateResult<NodeRef> {
        match subject {
            SubjectRef::Node(node) => Ok(node.clone()),
            SubjectRef::Alias(alias) => self
                .accessor
                .resolve_alias(alias)
                .await?
                .ok_or_else(|| PopulateError::UnresolvedSubject(alias.clone())),
        }
    }

    async fn resolve_field(&self, node: &NodeRef, spec: &PropertySpec) -> PopulateResult<Resolved> {
        match spec {
            PropertySpec::Leaf(predicate) => {
                let predicate = self.prefixes.expand(predicate);
                let value = self.accessor.get(node, &predicate).await?;
                Ok(value.map_or(Resolved::Absent, Resolved::Value))
            }
            PropertySpec::Collection { class, properties } => {
                let class = self.prefixes.expand(class);
                let index = TypeIndex::new(self.accessor.as_ref(), node.clone(), &self.vocabulary);
                let instances = index.instances(&class).await?;
                debug!(subject = %node, class = %class, count = instances.len(), "populating instances");

                let mut items = Vec::with_capacity(instances.len());
                for instance in instances {
                    let instance = SubjectRef::Node(instance);
                    items.push(self.populate(&instance, properties).await);
                }
                Ok(Resolved::List(items))
            }
            PropertySpec::Unsupported(_) => Ok(Resolved::Null),
        }
    }
}

impl std::fmt::Debug for Populator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Populator")
            .field("vocabulary", &self.vocabulary)
            .field("prefixes", &self.prefixes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MemoryGraph, Term};
    use crate::schema::SchemaField;
    use serde_json::json;

    const ALICE: &str = "https://alice.example/profile/card#me";

    fn graph() -> Arc<MemoryGraph> {
        let graph = MemoryGraph::new();
        graph.insert(ALICE, "http://xmlns.com/foaf/0.1/name", Term::string("Alice"));
        graph.insert(
            ALICE,
            "http://xmlns.com/foaf/0.1/knows",
            Term::node("https://bob.example/profile/card#me"),
        );
        graph.set_principal(Some(NodeRef::new(ALICE)));
        Arc::new(graph)
    }

    #[tokio::test]
    async fn leaves_resolve_through_prefixes() {
        let populator = Populator::new(graph());
        let field = SchemaField::new(SubjectRef::alias("user"))
            .with_leaf("name", "foaf:name")
            .with_leaf("friend", "foaf:knows");

        let object = populator.populate(&field.subject, &field.properties).await;
        assert_eq!(
            object.to_json(),
            json!({ "name": "Alice", "friend": "https://bob.example/profile/card#me" })
        );
    }

    #[tokio::test]
    async fn missing_value_is_absent_but_keyed() {
        let populator = Populator::new(graph());
        let field = SchemaField::new(SubjectRef::parse(ALICE))
            .with_leaf("name", "foaf:name")
            .with_leaf("age", "foaf:age");

        let object = populator.populate(&field.subject, &field.properties).await;
        let keys: Vec<&String> = object.keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(object.get("age"), Some(&Resolved::Absent));
    }

    #[tokio::test]
    async fn unbound_principal_leaves_fields_absent() {
        let graph = graph();
        graph.set_principal(None);
        let populator = Populator::new(graph);
        let mut properties = FieldMap::new();
        properties.insert("name".into(), PropertySpec::leaf("foaf:name"));
        properties.insert("odd".into(), PropertySpec::Unsupported(json!(true)));

        let object = populator.populate(&SubjectRef::alias("user"), &properties).await;
        assert_eq!(object.get("name"), Some(&Resolved::Absent));
        assert_eq!(object.get("odd"), Some(&Resolved::Null));
    }

    #[tokio::test]
    async fn unsupported_spec_resolves_to_null() {
        let populator = Populator::new(graph());
        let mut properties = FieldMap::new();
        properties.insert("odd".into(), PropertySpec::Unsupported(json!([1, 2])));
        properties.insert("name".into(), PropertySpec::leaf("foaf:name"));

        let object = populator.populate(&SubjectRef::parse(ALICE), &properties).await;
        assert_eq!(object.to_json(), json!({ "odd": null, "name": "Alice" }));
    }

    #[tokio::test]
    async fn authored_curie_subject_is_expanded() {
        let populator = Populator::new(graph())
            .with_prefixes(Prefixes::default().with("alice", "https://alice.example/profile/card#"));
        let (schema, _) = Schema::from_value(&json!({
            "me": { "subject": "alice:me", "properties": { "name": "foaf:name" } }
        }))
        .unwrap();

        let tree = populator.populate_schema(&schema).await;
        assert_eq!(tree.to_json(), json!({ "me": { "name": "Alice" } }));
    }

    #[tokio::test]
    async fn instance_handles_are_not_prefix_expanded() {
        let vocab = Vocabulary::default();
        let graph = MemoryGraph::new();
        graph.insert(ALICE, vocab.public_type_index.clone(), Term::node("https://alice.example/ti"));
        graph.add_member("https://alice.example/ti", "https://alice.example/ti#r");
        graph.insert("https://alice.example/ti#r", vocab.for_class.clone(), Term::node("Recipe"));
        graph.insert("https://alice.example/ti#r", vocab.instance.clone(), Term::node("https://alice.example/r/"));
        graph.add_member("https://alice.example/r/", "urn:uuid:1234");
        graph.insert("urn:uuid:1234", "pred:title", Term::string("Soup"));

        let populator = Populator::new(Arc::new(graph))
            .with_prefixes(Prefixes::default().with("urn", "https://wrong.example/"));
        let field = SchemaField::new(SubjectRef::parse(ALICE)).with_collection(
            "items",
            "Recipe",
            FieldMap::from_iter([("title".to_string(), PropertySpec::leaf("pred:title"))]),
        );

        let object = populator.populate(&field.subject, &field.properties).await;
        assert_eq!(object.to_json(), json!({ "items": [{ "title": "Soup" }] }));
    }

    #[tokio::test]
    async fn collection_without_type_index_is_empty_list() {
        let populator = Populator::new(graph());
        let field = SchemaField::new(SubjectRef::parse(ALICE)).with_collection(
            "items",
            "Recipe",
            FieldMap::new(),
        );

        let object = populator.populate(&field.subject, &field.properties).await;
        assert_eq!(object.get("items"), Some(&Resolved::List(Vec::new())));
    }
}
