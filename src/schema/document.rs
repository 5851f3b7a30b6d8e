//! Schema: the application's declaration of what to populate

use super::normalize::normalize_fields;
use super::types::{SchemaDiagnostic, SchemaField};
use crate::graph::DEFAULT_PRINCIPAL_ALIAS;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that make an authored schema unusable as a whole
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema must be a mapping of field names, found {0}")]
    NotAMapping(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for schema loading
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A normalized population schema
///
/// Read-only once built. Normalizing the output of `to_value()` yields
/// an equal schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, SchemaField>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, field: SchemaField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Normalize an authored schema using the default principal alias
    pub fn from_value(value: &Value) -> SchemaResult<(Self, Vec<SchemaDiagnostic>)> {
        Self::normalize(value, DEFAULT_PRINCIPAL_ALIAS)
    }

    /// Normalize an authored schema.
    ///
    /// The field named `principal_alias` may be a flat mapping of
    /// properties; it is rewritten to `{subject: <alias>, properties}`.
    /// Other fields without a `properties` mapping are dropped and
    /// reported.
    pub fn normalize(value: &Value, principal_alias: &str) -> SchemaResult<(Self, Vec<SchemaDiagnostic>)> {
        let Some(raw) = value.as_object() else {
            return Err(SchemaError::NotAMapping(value.to_string()));
        };
        let (fields, diagnostics) = normalize_fields(raw, principal_alias);
        Ok((Self { fields }, diagnostics))
    }

    /// Parse and normalize a YAML (or JSON) schema document
    pub fn from_yaml_str(source: &str, principal_alias: &str) -> SchemaResult<(Self, Vec<SchemaDiagnostic>)> {
        let value: Value = serde_yaml::from_str(source)?;
        Self::normalize(&value, principal_alias)
    }

    /// Load a schema document from disk
    pub fn load(path: impl AsRef<Path>, principal_alias: &str) -> SchemaResult<(Self, Vec<SchemaDiagnostic>)> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source, principal_alias)
    }

    /// Authored form of this schema, in full (non-shorthand) shape
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, field)| (name.clone(), field.to_value()))
                .collect(),
        )
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &SchemaField)> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
