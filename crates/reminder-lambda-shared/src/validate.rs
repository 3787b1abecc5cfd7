//! Schema-driven request body validation.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::ExternalError;
use crate::schema::Schema;

/// Prefix of every validation failure message.
pub const MALFORMED_BODY: &str = "Malformed body:";

/// Parse `body` as JSON, validate it against `schema`, and return it as `T`.
///
/// Every failure is a 400 [`ExternalError`]:
///
/// - unparsable JSON: `"Malformed body:\n"` followed by the parser diagnostic;
/// - schema violations: `"Malformed body:\n"` followed by all violation
///   messages, deduplicated in first-seen order, one per line.
///
/// A value that satisfies the schema is handed to `T` unchanged.
pub fn validate<T: DeserializeOwned>(body: &str, schema: &Schema) -> Result<T, ExternalError> {
    let parsed: Value = serde_json::from_str(body).map_err(|err| {
        warn!(error = %err, "request body is not valid JSON");
        malformed(err)
    })?;

    let messages = dedupe(schema.violations(&parsed));
    if !messages.is_empty() {
        warn!(violations = messages.len(), "request body failed schema validation");
        return Err(malformed(messages.join("\n")));
    }

    serde_json::from_value(parsed).map_err(|err| {
        warn!(error = %err, "schema-valid body does not match the expected type");
        malformed(err)
    })
}

fn malformed(detail: impl std::fmt::Display) -> ExternalError {
    ExternalError::bad_request(format!("{MALFORMED_BODY}\n{detail}"))
}

/// Drop repeated messages, keeping the first occurrence of each.
fn dedupe(messages: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(messages.len());
    for message in messages {
        if !unique.contains(&message) {
            unique.push(message);
        }
    }
    unique
}
