//! Resolved value trees
//!
//! Shaped like the schema that produced them. Serialization follows the
//! consumer's view: absent fields are omitted, `Null` is `null`, nodes
//! are IRI strings, collections are arrays.

use crate::graph::Term;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

/// The outcome of resolving one field
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// No value, or resolution failed
    Absent,
    /// The field's spec was not a supported shape
    Null,
    /// A leaf's value
    Value(Term),
    /// A typed collection, one object per instance
    List(Vec<ResolvedObject>),
}

impl Resolved {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Value(term) => Some(term),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ResolvedObject]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// JSON form; `None` for absent
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Null => Some(Value::Null),
            Self::Value(term) => Some(term.to_json()),
            Self::List(items) => Some(Value::Array(items.iter().map(ResolvedObject::to_json).collect())),
        }
    }
}

impl Serialize for Resolved {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Value(term) => term.to_json().serialize(serializer),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// A populated object: field name → resolved value, in schema order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedObject {
    fields: IndexMap<String, Resolved>,
}

impl ResolvedObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Resolved) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Resolved> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Resolved)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .filter_map(|(name, value)| value.to_json().map(|v| (name.clone(), v)))
                .collect(),
        )
    }
}

impl Serialize for ResolvedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.fields.iter().filter(|(_, v)| !v.is_absent());
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The result of one population run over a whole schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTree {
    fields: IndexMap<String, ResolvedObject>,
}

impl ResolvedTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, object: ResolvedObject) {
        self.fields.insert(name.into(), object);
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedObject> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &ResolvedObject)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, object)| (name.clone(), object.to_json()))
                .collect(),
        )
    }
}

impl Serialize for ResolvedTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, object) in &self.fields {
            map.serialize_entry(name, object)?;
        }
        map.end()
    }
}
