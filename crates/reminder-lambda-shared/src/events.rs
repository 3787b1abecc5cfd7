//! Trigger event envelopes delivered by AWS.
//!
//! Only the fields the framework or its controllers read are modeled; unknown
//! fields are ignored so that new AWS attributes never break deserialization.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ExternalError;
use crate::schema::Schema;
use crate::validate::validate;

/// API Gateway REST proxy integration request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    /// Route template, e.g. `/v1/reminder/{id}`.
    #[serde(default)]
    pub resource: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub http_method: Option<String>,

    /// API Gateway sends `null` rather than `{}` when there are none.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,

    /// Raw request body.
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub is_base64_encoded: bool,

    #[serde(default)]
    pub request_context: ApiGatewayRequestContext,
}

/// Subset of the API Gateway request context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequestContext {
    #[serde(default)]
    pub request_id: Option<String>,

    #[serde(default)]
    pub stage: Option<String>,
}

impl ApiGatewayProxyRequest {
    /// Look up a path parameter.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Look up a path parameter, failing with a 400 when it is missing or empty.
    pub fn require_path_parameter(&self, name: &str) -> Result<&str, ExternalError> {
        match self.path_parameter(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ExternalError::missing_path_parameter(name)),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// API Gateway REST proxy integration response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    pub body: String,

    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// S3 event notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    #[serde(default)]
    pub event_name: Option<String>,

    #[serde(default)]
    pub event_time: Option<String>,

    #[serde(default)]
    pub aws_region: Option<String>,

    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,

    #[serde(default)]
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Object {
    /// URL-encoded object key.
    pub key: String,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(rename = "eTag", default)]
    pub e_tag: Option<String>,
}

/// SNS notification delivered to a subscribed Lambda.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsEventRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEventRecord {
    #[serde(default)]
    pub event_source: Option<String>,

    #[serde(default)]
    pub event_subscription_arn: Option<String>,

    pub sns: SnsMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    pub message_id: String,

    #[serde(default)]
    pub topic_arn: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    pub message: String,

    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Batch of SQS messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SqsMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsMessage {
    pub message_id: String,

    #[serde(default)]
    pub receipt_handle: Option<String>,

    pub body: String,

    #[serde(rename = "eventSourceARN", default)]
    pub event_source_arn: Option<String>,

    #[serde(default)]
    pub aws_region: Option<String>,
}

impl SqsMessage {
    /// Validate this message's body against `schema` and parse it as `T`.
    pub fn parse_body<T: DeserializeOwned>(&self, schema: &Schema) -> Result<T, ExternalError> {
        validate(&self.body, schema)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_api_gateway_request_with_null_maps() {
        let event: ApiGatewayProxyRequest = serde_json::from_value(json!({
            "resource": "/v1/reminder/{id}",
            "path": "/v1/reminder/abc",
            "httpMethod": "GET",
            "headers": null,
            "queryStringParameters": null,
            "pathParameters": { "id": "abc" },
            "body": null,
            "isBase64Encoded": false,
            "requestContext": { "requestId": "req-1", "stage": "prod", "accountId": "123" },
            "multiValueHeaders": null
        }))
        .unwrap();

        assert_eq!(event.http_method.as_deref(), Some("GET"));
        assert_eq!(event.path_parameter("id"), Some("abc"));
        assert_eq!(event.request_context.request_id.as_deref(), Some("req-1"));
        assert!(event.body.is_none());
    }

    #[test]
    fn require_path_parameter_rejects_missing_and_empty() {
        let mut event = ApiGatewayProxyRequest::default();
        let err = event.require_path_parameter("id").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("`id`"));

        event.path_parameters = Some(HashMap::from([("id".to_string(), String::new())]));
        assert!(event.require_path_parameter("id").is_err());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let event = ApiGatewayProxyRequest {
            headers: Some(HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )])),
            ..Default::default()
        };
        assert_eq!(event.header("content-type"), Some("application/json"));
        assert_eq!(event.header("accept"), None);
    }

    #[test]
    fn response_serializes_with_aws_field_names() {
        let response = ApiGatewayProxyResponse {
            status_code: 200,
            headers: BTreeMap::from([("content-type".to_string(), "text/plain".to_string())]),
            body: "ok".to_string(),
            is_base64_encoded: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["headers"]["content-type"], "text/plain");
        assert_eq!(json["isBase64Encoded"], false);
    }

    #[test]
    fn deserializes_s3_sns_and_sqs_events() {
        let s3: S3Event = serde_json::from_value(json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "awsRegion": "eu-west-1",
                "s3": { "bucket": { "name": "uploads" }, "object": { "key": "a%20b.txt", "size": 12 } }
            }]
        }))
        .unwrap();
        assert_eq!(s3.records[0].s3.bucket.name, "uploads");
        assert_eq!(s3.records[0].s3.object.size, Some(12));

        let sns: SnsEvent = serde_json::from_value(json!({
            "Records": [{
                "EventSource": "aws:sns",
                "Sns": { "MessageId": "m-1", "Message": "hello", "Subject": null }
            }]
        }))
        .unwrap();
        assert_eq!(sns.records[0].sns.message, "hello");

        let sqs: SqsEvent = serde_json::from_value(json!({
            "Records": [{
                "messageId": "q-1",
                "body": "{\"n\":1}",
                "eventSourceARN": "arn:aws:sqs:eu-west-1:123:queue"
            }]
        }))
        .unwrap();
        assert_eq!(sqs.records[0].message_id, "q-1");
        assert!(sqs.records[0].event_source_arn.is_some());
    }

    #[test]
    fn sqs_message_parses_body_through_validator() {
        let schema = Schema::new(json!({
            "type": "object",
            "required": ["n"],
            "properties": { "n": { "type": "integer" } }
        }))
        .unwrap();
        let message = SqsMessage {
            message_id: "q-1".to_string(),
            body: r#"{"n":1}"#.to_string(),
            ..Default::default()
        };
        let value: serde_json::Value = message.parse_body(&schema).unwrap();
        assert_eq!(value, json!({ "n": 1 }));

        let bad = SqsMessage {
            body: r#"{"n":"one"}"#.to_string(),
            ..message
        };
        let err = bad.parse_body::<serde_json::Value>(&schema).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
