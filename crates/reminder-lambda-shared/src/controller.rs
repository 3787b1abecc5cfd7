//! Controller capabilities, one per trigger kind.
//!
//! A controller holds the business logic for exactly one route or trigger and
//! is owned by the handler built around it. Controllers return classified
//! errors and never swallow them; rendering and logging happen at the handler
//! boundary.
//!
//! Request body validation is the controller's job: the schema declared for
//! the route (or queue) is passed in, and the controller calls
//! [`validate`](crate::validate) when it needs the body.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ControllerError;
use crate::events::{ApiGatewayProxyRequest, S3Event, SnsEvent, SqsEvent};
use crate::schema::Schema;

/// Business logic behind a request/response route.
#[async_trait]
pub trait ApiController: Send + Sync {
    /// Result returned to the caller. A `String` is sent verbatim; anything
    /// else is rendered as pretty-printed JSON.
    type Response: Serialize + Send;

    /// Handle one request. `schema` is the route's request body schema, or
    /// `None` when the route declares no body.
    async fn process_event(
        &self,
        event: &ApiGatewayProxyRequest,
        schema: Option<&Schema>,
    ) -> Result<Self::Response, ControllerError>;
}

/// Business logic reacting to S3 notifications.
#[async_trait]
pub trait S3Controller: Send + Sync {
    async fn process_event(&self, event: &S3Event) -> Result<(), ControllerError>;
}

/// Business logic reacting to SNS messages.
#[async_trait]
pub trait SnsController: Send + Sync {
    async fn process_event(&self, event: &SnsEvent) -> Result<(), ControllerError>;
}

/// Business logic consuming SQS batches.
#[async_trait]
pub trait SqsController: Send + Sync {
    /// `schema` describes each message body, when the queue declares one.
    async fn process_event(
        &self,
        event: &SqsEvent,
        schema: Option<&Schema>,
    ) -> Result<(), ControllerError>;
}
