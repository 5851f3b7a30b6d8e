//! Terms of the linked-data graph: node handles, literals, subject references

use serde::{Deserialize, Serialize};

/// Handle to a node in the graph
///
/// Serializes as a plain string (an IRI, or a CURIE before expansion).
/// Equality is string equality on that form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(String);

impl NodeRef {
    /// Create a NodeRef from an IRI
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Typed literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

/// The object of a property: a related node or a literal value
///
/// In graph documents a node is written `{"@id": "<iri>"}`; anything
/// else is a literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    Node {
        #[serde(rename = "@id")]
        id: NodeRef,
    },
    Literal(Literal),
}

impl Term {
    pub fn node(iri: impl Into<String>) -> Self {
        Self::Node { id: NodeRef::new(iri) }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// The related node, if this term is one
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Self::Node { id } => Some(id),
            Self::Literal(_) => None,
        }
    }

    /// Convert to the JSON shape handed to consumers: IRIs as strings,
    /// literals as JSON scalars.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Node { id } => serde_json::Value::String(id.to_string()),
            Self::Literal(Literal::Bool(b)) => serde_json::Value::Bool(*b),
            Self::Literal(Literal::Int(i)) => serde_json::Value::from(*i),
            Self::Literal(Literal::Float(x)) => serde_json::Value::from(*x),
            Self::Literal(Literal::String(s)) => serde_json::Value::String(s.clone()),
        }
    }
}

/// String form, used for class comparisons and location lookups
impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node { id } => write!(f, "{}", id),
            Self::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

impl From<NodeRef> for Term {
    fn from(id: NodeRef) -> Self {
        Self::Node { id }
    }
}

/// How a schema names the subject it wants populated
///
/// Either a direct handle, or an alias such as `user` that the accessor
/// resolves against the current session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubjectRef {
    Node(NodeRef),
    Alias(String),
}

impl SubjectRef {
    /// Parse an authored subject string.
    ///
    /// Strings containing `:` (IRIs and CURIEs) are handles; bare words
    /// are aliases.
    pub fn parse(s: &str) -> Self {
        if s.contains(':') {
            Self::Node(NodeRef::new(s))
        } else {
            Self::Alias(s.to_string())
        }
    }

    pub fn alias(name: impl Into<String>) -> Self {
        Self::Alias(name.into())
    }

    /// The authored string form (inverse of `parse`)
    pub fn as_str(&self) -> &str {
        match self {
            Self::Node(node) => node.as_str(),
            Self::Alias(name) => name,
        }
    }
}

impl std::fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<NodeRef> for SubjectRef {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}
