//! Authored schema → normalized schema
//!
//! Shape checks happen here, once. Downstream code matches on
//! `PropertySpec` and never re-inspects raw values.

use super::types::{FieldMap, PropertySpec, SchemaDiagnostic, SchemaField};
use crate::graph::SubjectRef;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

/// Normalize the top-level mapping. Invalid fields are dropped and
/// reported; invalid property specs are kept as `Unsupported`.
pub(crate) fn normalize_fields(
    raw: &Map<String, Value>,
    principal_alias: &str,
) -> (IndexMap<String, SchemaField>, Vec<SchemaDiagnostic>) {
    let mut fields = IndexMap::new();
    let mut diagnostics = Vec::new();

    for (name, value) in raw {
        match normalize_field(name, value, principal_alias, &mut diagnostics) {
            Some(field) => {
                fields.insert(name.clone(), field);
            }
            None => {
                warn!(field = %name, "schema field dropped");
            }
        }
    }

    (fields, diagnostics)
}

fn normalize_field(
    name: &str,
    value: &Value,
    principal_alias: &str,
    diagnostics: &mut Vec<SchemaDiagnostic>,
) -> Option<SchemaField> {
    let Some(entry) = value.as_object() else {
        diagnostics.push(SchemaDiagnostic::new(name, "schema field must be a mapping"));
        return None;
    };

    let (properties, shorthand) = match entry.get("properties").and_then(Value::as_object) {
        Some(properties) => (properties, false),
        // Principal shorthand: a flat mapping of properties
        None if name == principal_alias => (entry, true),
        None => {
            diagnostics.push(SchemaDiagnostic::new(name, "missing `properties` mapping"));
            return None;
        }
    };

    let subject = match entry.get("subject") {
        _ if shorthand => SubjectRef::alias(principal_alias),
        Some(Value::String(s)) => SubjectRef::parse(s),
        Some(other) => {
            diagnostics.push(SchemaDiagnostic::new(
                name,
                format!("subject must be a string, found {}", kind_of(other)),
            ));
            return None;
        }
        None => SubjectRef::alias(principal_alias),
    };

    Some(SchemaField {
        subject,
        properties: normalize_properties(name, properties, diagnostics),
    })
}

pub(crate) fn normalize_properties(
    path: &str,
    raw: &Map<String, Value>,
    diagnostics: &mut Vec<SchemaDiagnostic>,
) -> FieldMap {
    raw.iter()
        .map(|(name, value)| {
            let path = format!("{}.{}", path, name);
            let spec = normalize_spec(&path, value, diagnostics);
            (name.clone(), spec)
        })
        .collect()
}

fn normalize_spec(path: &str, value: &Value, diagnostics: &mut Vec<SchemaDiagnostic>) -> PropertySpec {
    match value {
        Value::String(predicate) => PropertySpec::Leaf(predicate.clone()),
        Value::Object(entry) => {
            let class = entry.get("type").and_then(Value::as_str);
            let properties = entry.get("properties").and_then(Value::as_object);
            match (class, properties) {
                (Some(class), Some(properties)) => PropertySpec::Collection {
                    class: class.to_string(),
                    properties: normalize_properties(path, properties, diagnostics),
                },
                _ => {
                    warn!(path, "typed collection needs `type` and `properties`");
                    diagnostics.push(SchemaDiagnostic::new(
                        path,
                        "typed collection needs a string `type` and a `properties` mapping",
                    ));
                    PropertySpec::Unsupported(value.clone())
                }
            }
        }
        other => {
            warn!(path, kind = kind_of(other), "unsupported property spec");
            diagnostics.push(SchemaDiagnostic::new(
                path,
                format!("unsupported property spec: {}", kind_of(other)),
            ));
            PropertySpec::Unsupported(other.clone())
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
