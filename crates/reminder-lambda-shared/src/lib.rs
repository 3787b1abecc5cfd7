//! Event-handling framework shared by the reminder AWS Lambda functions.
//!
//! - [`ApiController`] / [`create_api_handler`]: request/response routes with
//!   response shaping driven by a [`RouteSpec`]
//! - [`S3Controller`], [`SnsController`], [`SqsController`] and their
//!   fire-and-forget handler factories
//! - [`ExternalError`] / [`InternalError`]: the error taxonomy that decides
//!   what a caller is allowed to see
//! - [`validate`]: JSON Schema validation of request bodies
//! - [`ApiRoutes`] / [`DocumentationGenerator`]: per-API route aggregation
//! - [`init_tracing`] / [`init_tracing_with`]: JSON tracing for CloudWatch Logs, text for the CLI
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides event builders for handler tests.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod api_handler;
mod controller;
mod docs;
mod error;
mod event_handler;
mod events;
mod route_spec;
mod schema;
mod tracing_init;
mod validate;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api_handler::{create_api_handler, ApiHandler};
pub use controller::{ApiController, S3Controller, SnsController, SqsController};
pub use docs::{
    ApiDescription, ApiRoutes, DocsError, DocumentationGenerator, OpenApiGenerator,
    RegisteredRoute, SecurityScheme,
};
pub use error::{ControllerError, ExternalError, InternalError, INTERNAL_SERVER_ERROR_BODY};
pub use event_handler::{
    create_s3_handler, create_sns_handler, create_sqs_handler, run_trigger_handler, S3Handler,
    SnsHandler, SqsHandler, TriggerHandler,
};
pub use events::{
    ApiGatewayProxyRequest, ApiGatewayProxyResponse, ApiGatewayRequestContext, S3Bucket,
    S3Entity, S3Event, S3EventRecord, S3Object, SnsEvent, SnsEventRecord, SnsMessage, SqsEvent,
    SqsMessage,
};
pub use route_spec::{BodySpec, RouteSpec};
pub use schema::{Schema, SchemaError};
pub use tracing_init::{init_tracing, init_tracing_with, LogFormat, DEFAULT_LOG_FILTER};
pub use validate::{validate, MALFORMED_BODY};
