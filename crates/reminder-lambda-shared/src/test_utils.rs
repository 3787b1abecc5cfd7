//! Test utilities for Lambda handler testing.
//!
//! Builders for the trigger envelopes so handler tests don't have to spell out
//! the AWS JSON by hand. Enable the `test-utils` feature to use them from
//! dependent crates.
//!
//! ```ignore
//! use reminder_lambda_shared::test_utils::{api_request, mock_request_id};
//!
//! let request = api_request("GET", "/v1/reminder/{id}")
//!     .path_parameter("id", "abc")
//!     .request_id(&mock_request_id("get-1"))
//!     .build();
//! ```

use std::collections::HashMap;

use crate::events::{
    ApiGatewayProxyRequest, ApiGatewayRequestContext, S3Bucket, S3Entity, S3Event, S3EventRecord,
    S3Object, SnsEvent, SnsEventRecord, SnsMessage, SqsEvent, SqsMessage,
};

/// Create a mock request ID in the format `test-request-{suffix}`.
///
/// `lambda_runtime::Context` is non-exhaustive, so tests carry the id on the
/// API Gateway request context instead.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

/// Builder for [`ApiGatewayProxyRequest`].
#[derive(Debug, Clone, Default)]
pub struct ApiRequestBuilder {
    request: ApiGatewayProxyRequest,
}

/// Start building a request for `method` on the route template `resource`.
pub fn api_request(method: &str, resource: &str) -> ApiRequestBuilder {
    ApiRequestBuilder {
        request: ApiGatewayProxyRequest {
            resource: Some(resource.to_string()),
            path: Some(resource.to_string()),
            http_method: Some(method.to_string()),
            request_context: ApiGatewayRequestContext {
                request_id: Some(mock_request_id("default")),
                stage: Some("test".to_string()),
            },
            ..Default::default()
        },
    }
}

impl ApiRequestBuilder {
    /// Set a path parameter and substitute it into the concrete path.
    pub fn path_parameter(mut self, name: &str, value: &str) -> Self {
        if let Some(path) = self.request.path.as_mut() {
            *path = path.replace(&format!("{{{name}}}"), value);
        }
        self.request
            .path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request
            .headers
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    pub fn request_id(mut self, request_id: &str) -> Self {
        self.request.request_context.request_id = Some(request_id.to_string());
        self
    }

    pub fn build(self) -> ApiGatewayProxyRequest {
        self.request
    }
}

/// An `ObjectCreated:Put` notification, one record per key.
pub fn s3_put_event(bucket: &str, keys: &[&str]) -> S3Event {
    S3Event {
        records: keys
            .iter()
            .map(|key| S3EventRecord {
                event_name: Some("ObjectCreated:Put".to_string()),
                aws_region: Some("us-east-1".to_string()),
                s3: S3Entity {
                    bucket: S3Bucket {
                        name: bucket.to_string(),
                        arn: Some(format!("arn:aws:s3:::{bucket}")),
                    },
                    object: S3Object {
                        key: key.to_string(),
                        ..Default::default()
                    },
                },
                ..Default::default()
            })
            .collect(),
    }
}

/// One SNS notification per message, all from `topic_arn`.
pub fn sns_event(topic_arn: &str, messages: &[&str]) -> SnsEvent {
    SnsEvent {
        records: messages
            .iter()
            .enumerate()
            .map(|(i, message)| SnsEventRecord {
                event_source: Some("aws:sns".to_string()),
                sns: SnsMessage {
                    message_id: format!("sns-{i}"),
                    topic_arn: Some(topic_arn.to_string()),
                    message: message.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect(),
    }
}

/// A batch of SQS messages with the given bodies.
pub fn sqs_event(bodies: &[&str]) -> SqsEvent {
    SqsEvent {
        records: bodies
            .iter()
            .enumerate()
            .map(|(i, body)| SqsMessage {
                message_id: format!("sqs-{i}"),
                receipt_handle: Some(format!("receipt-{i}")),
                body: body.to_string(),
                ..Default::default()
            })
            .collect(),
    }
}
