//! Compiled JSON Schema documents.

use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// Raised when a schema document cannot be compiled.
///
/// Schemas are built while a Lambda starts, so this is a configuration error
/// and never reaches a caller.
#[derive(Debug, Clone, Error)]
#[error("invalid JSON schema: {message}")]
pub struct SchemaError {
    pub message: String,
}

/// A JSON Schema document together with its compiled validator.
///
/// Format keywords (`email`, `date`, ...) are asserted, not just annotated.
#[derive(Clone)]
pub struct Schema {
    document: Value,
    validator: Arc<Validator>,
}

impl Schema {
    /// Compile a schema document.
    pub fn new(document: Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&document)
            .map_err(|err| SchemaError {
                message: err.to_string(),
            })?;
        Ok(Self {
            document,
            validator: Arc::new(validator),
        })
    }

    /// The raw schema document, as consumed by documentation generators.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Whether `instance` satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Human-readable descriptions of every violation, in validator order.
    ///
    /// Violations below the document root are prefixed with their JSON pointer.
    pub fn violations(&self, instance: &Value) -> Vec<String> {
        self.validator
            .iter_errors(instance)
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_invalid_schema_document() {
        let err = Schema::new(json!({ "type": 12 })).unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON schema"));
    }

    #[test]
    fn reports_every_violation() {
        let schema = Schema::new(json!({
            "type": "object",
            "required": ["name", "description"],
            "properties": { "name": { "type": "string" } }
        }))
        .unwrap();

        let violations = schema.violations(&json!({ "name": 5 }));
        assert_eq!(violations.len(), 2, "{violations:?}");
        assert!(violations.iter().any(|v| v.contains("description")));
        assert!(violations.iter().any(|v| v.starts_with("/name: ")));
    }

    #[test]
    fn asserts_formats() {
        let schema = Schema::new(json!({ "type": "string", "format": "email" })).unwrap();
        assert!(schema.is_valid(&json!("someone@example.com")));
        assert!(!schema.is_valid(&json!("not-an-email")));
    }

    #[test]
    fn keeps_raw_document() {
        let document = json!({ "type": "object" });
        let schema = Schema::new(document.clone()).unwrap();
        assert_eq!(schema.document(), &document);
    }
}
