//! Declarative contract of a request/response route.
//!
//! A [`RouteSpec`] drives the response shaping in
//! [`ApiHandler`](crate::ApiHandler) and is also what the documentation
//! generator reads, so both always agree on schemas, content types and status
//! codes.

use std::collections::BTreeMap;

use http::StatusCode;

use crate::schema::Schema;

/// A body schema with the content type it is exchanged as.
///
/// Pairing them makes it impossible to declare a content type without a
/// schema, or the reverse.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub schema: Schema,
    pub content_type: String,
}

/// Contract metadata for one request/response route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSpec {
    /// A short description.
    pub summary: String,
    /// A longer description.
    pub description: Option<String>,
    pub request_body: Option<BodySpec>,
    pub response_body: Option<BodySpec>,
    /// Static headers added to every successful response.
    pub response_headers: BTreeMap<String, String>,
    pub success_code: u16,
    /// Error statuses the route may answer with.
    pub error_codes: Vec<u16>,
    /// Whether successful bodies are base64-encoded binary.
    pub is_base64_encoded: bool,
}

impl RouteSpec {
    /// Start a spec answering `200 OK` with no bodies declared.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: None,
            request_body: None,
            response_body: None,
            response_headers: BTreeMap::new(),
            success_code: StatusCode::OK.as_u16(),
            error_codes: Vec::new(),
            is_base64_encoded: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn request_body(mut self, schema: Schema, content_type: impl Into<String>) -> Self {
        self.request_body = Some(BodySpec {
            schema,
            content_type: content_type.into(),
        });
        self
    }

    pub fn response_body(mut self, schema: Schema, content_type: impl Into<String>) -> Self {
        self.response_body = Some(BodySpec {
            schema,
            content_type: content_type.into(),
        });
        self
    }

    pub fn response_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response_headers.insert(name.into(), value.into());
        self
    }

    pub fn success_code(mut self, status: StatusCode) -> Self {
        self.success_code = status.as_u16();
        self
    }

    pub fn error_codes(mut self, codes: impl IntoIterator<Item = StatusCode>) -> Self {
        self.error_codes = codes.into_iter().map(|code| code.as_u16()).collect();
        self
    }

    pub fn base64_encoded(mut self, encoded: bool) -> Self {
        self.is_base64_encoded = encoded;
        self
    }

    pub fn request_body_schema(&self) -> Option<&Schema> {
        self.request_body.as_ref().map(|body| &body.schema)
    }

    pub fn request_content_type(&self) -> Option<&str> {
        self.request_body
            .as_ref()
            .map(|body| body.content_type.as_str())
    }

    pub fn response_body_schema(&self) -> Option<&Schema> {
        self.response_body.as_ref().map(|body| &body.schema)
    }

    pub fn response_content_type(&self) -> Option<&str> {
        self.response_body
            .as_ref()
            .map(|body| body.content_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Schema {
        Schema::new(json!({ "type": "object" })).unwrap()
    }

    #[test]
    fn defaults() {
        let spec = RouteSpec::new("Ping");
        assert_eq!(spec.success_code, 200);
        assert!(!spec.is_base64_encoded);
        assert!(spec.request_body_schema().is_none());
        assert!(spec.request_content_type().is_none());
        assert!(spec.response_content_type().is_none());
    }

    #[test]
    fn content_type_travels_with_schema() {
        let spec = RouteSpec::new("Create")
            .request_body(schema(), "application/json")
            .response_body(schema(), "application/json");
        assert!(spec.request_body_schema().is_some());
        assert_eq!(spec.request_content_type(), Some("application/json"));
        assert!(spec.response_body_schema().is_some());
        assert_eq!(spec.response_content_type(), Some("application/json"));
    }

    #[test]
    fn builder_sets_codes_and_headers() {
        let spec = RouteSpec::new("Create")
            .description("Creates a thing.")
            .success_code(StatusCode::CREATED)
            .error_codes([StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR])
            .response_header("cache-control", "no-store")
            .base64_encoded(true);
        assert_eq!(spec.description.as_deref(), Some("Creates a thing."));
        assert_eq!(spec.success_code, 201);
        assert_eq!(spec.error_codes, vec![400, 500]);
        assert_eq!(spec.response_headers["cache-control"], "no-store");
        assert!(spec.is_base64_encoded);
    }
}
