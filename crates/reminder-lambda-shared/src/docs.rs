//! Per-API route aggregation and the documentation generator contract.
//!
//! Every request/response route of an API is registered with its resolved
//! path, method and security scheme. A [`DocumentationGenerator`] turns the
//! ordered registry plus a base URL into an [`ApiDescription`] and writes it
//! to disk. [`OpenApiGenerator`] is the bundled OpenAPI 3 implementation.

use std::fs;
use std::path::{Path, PathBuf};

use http::{Method, StatusCode};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::route_spec::{BodySpec, RouteSpec};

/// Errors raised while registering routes or producing documentation.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("route path `{path}` must begin with /")]
    RelativePath { path: String },

    #[error("route {method} {path} is already registered")]
    DuplicateRoute { method: Method, path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// How callers authenticate against a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityScheme {
    /// SigV4-signed requests.
    Iam,
    /// Bearer tokens issued by a JWT / user-pool authorizer.
    Jwt,
}

impl SecurityScheme {
    fn key(self) -> &'static str {
        match self {
            SecurityScheme::Iam => "iam",
            SecurityScheme::Jwt => "jwt",
        }
    }

    fn definition(self) -> Value {
        match self {
            SecurityScheme::Iam => json!({
                "type": "apiKey",
                "name": "Authorization",
                "in": "header",
                "x-amazon-apigateway-authtype": "awsSigv4"
            }),
            SecurityScheme::Jwt => json!({
                "type": "http",
                "scheme": "bearer",
                "bearerFormat": "JWT"
            }),
        }
    }
}

/// A route spec bound to where and how it is exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredRoute {
    pub spec: RouteSpec,
    pub path: String,
    pub method: Method,
    pub security: Option<SecurityScheme>,
    /// OAuth-style scopes required by the authorizer, if any.
    pub scopes: Vec<String>,
}

impl RegisteredRoute {
    /// Names of the `{param}` segments of the path, in order.
    pub fn path_parameters(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }
}

/// The ordered set of routes making up one API.
#[derive(Debug, Clone, Default)]
pub struct ApiRoutes {
    title: String,
    version: String,
    routes: Vec<RegisteredRoute>,
}

impl ApiRoutes {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            routes: Vec::new(),
        }
    }

    /// Add a route. Paths must be absolute and each (method, path) pair unique.
    pub fn register(
        &mut self,
        spec: RouteSpec,
        path: impl Into<String>,
        method: Method,
        security: Option<SecurityScheme>,
    ) -> Result<(), DocsError> {
        self.register_with_scopes(spec, path, method, security, Vec::new())
    }

    pub fn register_with_scopes(
        &mut self,
        spec: RouteSpec,
        path: impl Into<String>,
        method: Method,
        security: Option<SecurityScheme>,
        scopes: Vec<String>,
    ) -> Result<(), DocsError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(DocsError::RelativePath { path });
        }
        if self
            .routes
            .iter()
            .any(|route| route.method == method && route.path == path)
        {
            return Err(DocsError::DuplicateRoute { method, path });
        }

        debug!(method = %method, path = %path, summary = %spec.summary, "registering route");
        self.routes.push(RegisteredRoute {
            spec,
            path,
            method,
            security,
            scopes,
        });
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[RegisteredRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// A generated, machine-readable API description.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDescription {
    /// Output file name, e.g. `openapi.json`.
    pub file_name: String,
    pub document: Value,
}

/// Produces API descriptions from a route registry.
pub trait DocumentationGenerator {
    fn generate(&self, api: &ApiRoutes, base_url: &str) -> Result<ApiDescription, DocsError>;

    /// Write the description under `dir`, returning the files written.
    fn write_output_files(
        &self,
        description: &ApiDescription,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, DocsError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&description.file_name);
        fs::write(&path, serde_json::to_string_pretty(&description.document)?)?;
        info!(path = %path.display(), "wrote API description");
        Ok(vec![path])
    }
}

/// OpenAPI 3.0 JSON generator.
#[derive(Debug, Clone, Default)]
pub struct OpenApiGenerator;

impl OpenApiGenerator {
    fn operation(route: &RegisteredRoute) -> Value {
        let spec = &route.spec;
        let mut operation = Map::new();
        operation.insert("summary".into(), json!(spec.summary));
        if let Some(description) = &spec.description {
            operation.insert("description".into(), json!(description));
        }

        let parameters: Vec<Value> = route
            .path_parameters()
            .into_iter()
            .map(|name| {
                json!({
                    "name": name,
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" }
                })
            })
            .collect();
        if !parameters.is_empty() {
            operation.insert("parameters".into(), Value::Array(parameters));
        }

        if let Some(body) = &spec.request_body {
            operation.insert(
                "requestBody".into(),
                json!({ "required": true, "content": content(body) }),
            );
        }

        let mut responses = Map::new();
        let mut success = Map::new();
        success.insert(
            "description".into(),
            json!(status_description(spec.success_code)),
        );
        if let Some(body) = &spec.response_body {
            success.insert("content".into(), content(body));
        }
        responses.insert(spec.success_code.to_string(), Value::Object(success));
        for code in &spec.error_codes {
            responses.insert(
                code.to_string(),
                json!({
                    "description": status_description(*code),
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }),
            );
        }
        operation.insert("responses".into(), Value::Object(responses));

        if let Some(scheme) = route.security {
            let mut requirement = Map::new();
            requirement.insert(scheme.key().to_string(), json!(route.scopes));
            operation.insert(
                "security".into(),
                Value::Array(vec![Value::Object(requirement)]),
            );
        }

        Value::Object(operation)
    }
}

fn content(body: &BodySpec) -> Value {
    let mut content = Map::new();
    content.insert(
        body.content_type.clone(),
        json!({ "schema": body.schema.document() }),
    );
    Value::Object(content)
}

fn status_description(code: u16) -> String {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Response")
        .to_string()
}

fn server_url(base_url: &str) -> String {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        base_url.to_string()
    } else {
        format!("https://{base_url}")
    }
}

impl DocumentationGenerator for OpenApiGenerator {
    fn generate(&self, api: &ApiRoutes, base_url: &str) -> Result<ApiDescription, DocsError> {
        let mut paths = Map::new();
        let mut schemes = Map::new();

        for route in api.routes() {
            let methods = paths
                .entry(route.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(methods) = methods {
                methods.insert(
                    route.method.as_str().to_ascii_lowercase(),
                    Self::operation(route),
                );
            }
            if let Some(scheme) = route.security {
                schemes.insert(scheme.key().to_string(), scheme.definition());
            }
        }

        let mut document = json!({
            "openapi": "3.0.3",
            "info": { "title": api.title(), "version": api.version() },
            "servers": [{ "url": server_url(base_url) }],
            "paths": paths,
        });
        if !schemes.is_empty() {
            document["components"] = json!({ "securitySchemes": schemes });
        }

        Ok(ApiDescription {
            file_name: "openapi.json".to_string(),
            document,
        })
    }
}
