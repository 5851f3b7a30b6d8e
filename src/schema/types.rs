//! Normalized schema types

use crate::graph::SubjectRef;
use indexmap::IndexMap;
use serde_json::{json, Value};

/// Field name → property spec, in declared order
pub type FieldMap = IndexMap<String, PropertySpec>;

/// One node of the schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySpec {
    /// A predicate; resolves to the subject's value for it
    Leaf(String),
    /// All instances of `class` found through the subject's type index,
    /// each populated with `properties`
    Collection { class: String, properties: FieldMap },
    /// An authored shape that is neither; resolves to `null`
    Unsupported(Value),
}

impl PropertySpec {
    pub fn leaf(predicate: impl Into<String>) -> Self {
        Self::Leaf(predicate.into())
    }

    pub fn collection(class: impl Into<String>, properties: FieldMap) -> Self {
        Self::Collection {
            class: class.into(),
            properties,
        }
    }

    /// Authored form (inverse of normalization)
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(predicate) => Value::String(predicate.clone()),
            Self::Collection { class, properties } => json!({
                "type": class,
                "properties": fields_to_value(properties),
            }),
            Self::Unsupported(raw) => raw.clone(),
        }
    }
}

pub(crate) fn fields_to_value(fields: &FieldMap) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, spec)| (name.clone(), spec.to_value()))
            .collect(),
    )
}

/// A top-level schema entry: which subject, and what to resolve on it
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub subject: SubjectRef,
    pub properties: FieldMap,
}

impl SchemaField {
    pub fn new(subject: SubjectRef) -> Self {
        Self {
            subject,
            properties: FieldMap::new(),
        }
    }

    /// Add a leaf property
    pub fn with_leaf(mut self, name: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.properties.insert(name.into(), PropertySpec::leaf(predicate));
        self
    }

    /// Add a typed collection
    pub fn with_collection(
        mut self,
        name: impl Into<String>,
        class: impl Into<String>,
        properties: FieldMap,
    ) -> Self {
        self.properties
            .insert(name.into(), PropertySpec::collection(class, properties));
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "subject": self.subject.as_str(),
            "properties": fields_to_value(&self.properties),
        })
    }
}

/// A problem found while normalizing an authored schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// Dotted path to the offending entry, e.g. `meals.items.title`
    pub path: String,
    pub message: String,
}

impl SchemaDiagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
