//! Per-document customization points.

use serde_json::{Map, Value};

/// Site-specific document handling applied during import.
///
/// Both methods have no-op defaults, so an implementation overrides only what
/// it needs.
pub trait DocumentHooks: Send + Sync {
    /// Mutate a parsed document before it is queued.
    fn transform(&self, _document: &mut Map<String, Value>) {}

    /// Identifier for a document, given the transformed document and the
    /// archive line it came from. An empty string lets the store assign one.
    fn document_id(&self, _document: &Map<String, Value>, _raw_line: &str) -> String {
        String::new()
    }
}

/// Imports documents unchanged with store-assigned identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl DocumentHooks for NoopHooks {}

/// Takes the identifier from a top-level field of each document.
///
/// String values are used as-is and numbers in their JSON form. Documents
/// where the field is missing or has any other type get a store-assigned id.
#[derive(Debug, Clone)]
pub struct IdFieldHooks {
    field: String,
}

impl IdFieldHooks {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl DocumentHooks for IdFieldHooks {
    fn document_id(&self, document: &Map<String, Value>, _raw_line: &str) -> String {
        match document.get(&self.field) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_noop_hooks() {
        let mut document = object(json!({"id": "a", "n": 1}));
        let before = document.clone();

        NoopHooks.transform(&mut document);
        assert_eq!(document, before);
        assert_eq!(NoopHooks.document_id(&document, r#"{"id":"a","n":1}"#), "");
    }

    #[test]
    fn test_id_field_hooks() {
        let hooks = IdFieldHooks::new("uid");

        assert_eq!(hooks.document_id(&object(json!({"uid": "u-1"})), ""), "u-1");
        assert_eq!(hooks.document_id(&object(json!({"uid": 42})), ""), "42");
        assert_eq!(hooks.document_id(&object(json!({"uid": null})), ""), "");
        assert_eq!(hooks.document_id(&object(json!({"uid": {"a": 1}})), ""), "");
        assert_eq!(hooks.document_id(&object(json!({"other": "x"})), ""), "");
    }

    #[test]
    fn test_custom_hooks_override_both() {
        struct Stamp;

        impl DocumentHooks for Stamp {
            fn transform(&self, document: &mut Map<String, Value>) {
                document.insert("imported".to_string(), Value::Bool(true));
            }

            fn document_id(&self, _document: &Map<String, Value>, raw_line: &str) -> String {
                format!("len-{}", raw_line.len())
            }
        }

        let mut document = object(json!({"a": 1}));
        Stamp.transform(&mut document);
        assert_eq!(document.get("imported"), Some(&Value::Bool(true)));
        assert_eq!(Stamp.document_id(&document, r#"{"a":1}"#), "len-7");
    }
}
