//! Route registry of the reminder API and documentation output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use http::Method;
use tracing::info;

use reminder_lambda_shared::{ApiRoutes, DocumentationGenerator, OpenApiGenerator, SecurityScheme};

pub const API_TITLE: &str = "Reminder API";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every route of the reminder API, in the order they are documented.
pub fn reminder_api() -> Result<ApiRoutes> {
    let mut api = ApiRoutes::new(API_TITLE, API_VERSION);

    api.register(
        reminder_lambda_get::route_spec().context("invalid get-reminder schema")?,
        reminder_lambda_get::ROUTE_PATH,
        Method::GET,
        None,
    )?;
    api.register(
        reminder_lambda_create::route_spec().context("invalid create-reminder schema")?,
        reminder_lambda_create::ROUTE_PATH,
        Method::POST,
        Some(SecurityScheme::Iam),
    )?;

    Ok(api)
}

/// Generate the OpenAPI description for `base_url` into `out_dir`.
pub fn generate_docs(base_url: &str, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let api = reminder_api()?;
    let generator = OpenApiGenerator;
    let description = generator
        .generate(&api, base_url)
        .context("failed to generate API description")?;
    let written = generator
        .write_output_files(&description, out_dir)
        .with_context(|| format!("failed to write docs to {}", out_dir.display()))?;
    info!(routes = api.len(), files = written.len(), "documentation generated");
    Ok(written)
}
