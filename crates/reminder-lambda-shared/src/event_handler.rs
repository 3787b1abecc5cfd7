//! Handler factories for fire-and-forget triggers (S3, SNS, SQS).
//!
//! Nobody waits for these invocations, so a failing controller is logged and
//! the invocation still completes normally. Redelivery, if any, is left to the
//! delivery system's own configuration.

use std::sync::Arc;

use async_trait::async_trait;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::de::DeserializeOwned;
use tracing::{error, info_span, Instrument};

use crate::controller::{S3Controller, SnsController, SqsController};
use crate::error::ControllerError;
use crate::events::{S3Event, SnsEvent, SqsEvent};
use crate::schema::Schema;

/// A handler whose invocation produces no response.
#[async_trait]
pub trait TriggerHandler: Send + Sync + 'static {
    /// Envelope delivered by the trigger.
    type Event: DeserializeOwned + Send + Sync + 'static;

    /// Trigger name used in logs.
    const KIND: &'static str;

    /// Process one event. Never fails; controller errors are logged.
    async fn handle(&self, event: &Self::Event);
}

/// Serve a fire-and-forget handler on the Lambda runtime.
pub async fn run_trigger_handler<H: TriggerHandler>(handler: H) -> Result<(), Error> {
    let handler = Arc::new(handler);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<H::Event>| {
        let handler = Arc::clone(&handler);
        async move {
            let span = info_span!(
                "trigger",
                kind = H::KIND,
                request_id = %event.context.request_id
            );
            handler.handle(&event.payload).instrument(span).await;
            Ok::<(), Error>(())
        }
    }))
    .await
}

fn log_dropped(kind: &str, records: usize, err: &ControllerError) {
    error!(
        trigger = kind,
        records,
        status = err.status_code(),
        error = %err,
        "controller failed; event dropped"
    );
}

/// Handler for S3 event notifications.
pub struct S3Handler<C> {
    controller: C,
}

pub fn create_s3_handler<C: S3Controller>(controller: C) -> S3Handler<C> {
    S3Handler { controller }
}

#[async_trait]
impl<C: S3Controller + 'static> TriggerHandler for S3Handler<C> {
    type Event = S3Event;
    const KIND: &'static str = "s3";

    async fn handle(&self, event: &S3Event) {
        if let Err(err) = self.controller.process_event(event).await {
            log_dropped(Self::KIND, event.records.len(), &err);
        }
    }
}

/// Handler for SNS notifications.
pub struct SnsHandler<C> {
    controller: C,
}

pub fn create_sns_handler<C: SnsController>(controller: C) -> SnsHandler<C> {
    SnsHandler { controller }
}

#[async_trait]
impl<C: SnsController + 'static> TriggerHandler for SnsHandler<C> {
    type Event = SnsEvent;
    const KIND: &'static str = "sns";

    async fn handle(&self, event: &SnsEvent) {
        if let Err(err) = self.controller.process_event(event).await {
            log_dropped(Self::KIND, event.records.len(), &err);
        }
    }
}

/// Handler for SQS batches, optionally carrying a message body schema.
pub struct SqsHandler<C> {
    controller: C,
    schema: Option<Schema>,
}

/// The schema is handed to the controller; the handler does not validate.
pub fn create_sqs_handler<C: SqsController>(controller: C, schema: Option<Schema>) -> SqsHandler<C> {
    SqsHandler { controller, schema }
}

#[async_trait]
impl<C: SqsController + 'static> TriggerHandler for SqsHandler<C> {
    type Event = SqsEvent;
    const KIND: &'static str = "sqs";

    async fn handle(&self, event: &SqsEvent) {
        if let Err(err) = self
            .controller
            .process_event(event, self.schema.as_ref())
            .await
        {
            log_dropped(Self::KIND, event.records.len(), &err);
        }
    }
}
