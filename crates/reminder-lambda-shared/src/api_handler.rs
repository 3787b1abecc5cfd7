//! Handler factory for API Gateway request/response routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::StatusCode;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info_span, warn, Instrument};

use crate::controller::ApiController;
use crate::error::{ControllerError, INTERNAL_SERVER_ERROR_BODY};
use crate::events::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use crate::route_spec::RouteSpec;

/// A controller bound to the contract of its route.
///
/// Every invocation ends in exactly one of two outcomes: a success response
/// shaped by the [`RouteSpec`], or an error response rendered from the
/// classified [`ControllerError`]. The handler itself never fails.
pub struct ApiHandler<C> {
    controller: C,
    spec: RouteSpec,
}

/// Wrap `controller` with response shaping and error classification for `spec`.
pub fn create_api_handler<C: ApiController>(controller: C, spec: RouteSpec) -> ApiHandler<C> {
    ApiHandler { controller, spec }
}

impl<C: ApiController> ApiHandler<C> {
    pub fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Run the controller for one request and shape the outcome.
    pub async fn handle(&self, event: &ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
        let outcome = match self
            .controller
            .process_event(event, self.spec.request_body_schema())
            .await
        {
            Ok(response) => self.success_response(&response),
            Err(err) => Err(err),
        };
        outcome.unwrap_or_else(error_response)
    }

    /// Entry point for a Lambda invocation; attaches the request id to the span.
    pub async fn invoke(&self, event: LambdaEvent<ApiGatewayProxyRequest>) -> ApiGatewayProxyResponse {
        let span = info_span!(
            "api_request",
            request_id = %event.context.request_id,
            route = %self.spec.summary
        );
        self.handle(&event.payload).instrument(span).await
    }

    /// Serve this handler on the Lambda runtime until the environment stops it.
    pub async fn run(self) -> Result<(), Error>
    where
        C: 'static,
    {
        let handler = Arc::new(self);
        lambda_runtime::run(service_fn(
            move |event: LambdaEvent<ApiGatewayProxyRequest>| {
                let handler = Arc::clone(&handler);
                async move { Ok::<_, Error>(handler.invoke(event).await) }
            },
        ))
        .await
    }

    fn success_response(
        &self,
        response: &C::Response,
    ) -> Result<ApiGatewayProxyResponse, ControllerError> {
        let body = render_body(response).map_err(|err| ControllerError::Unexpected(err.into()))?;

        let mut headers = self.spec.response_headers.clone();
        if let Some(content_type) = self.spec.response_content_type() {
            headers.insert(CONTENT_TYPE.as_str().to_string(), content_type.to_string());
        }

        Ok(ApiGatewayProxyResponse {
            status_code: self.spec.success_code,
            headers,
            body,
            is_base64_encoded: self.spec.is_base64_encoded,
        })
    }
}

/// Strings are sent as-is; everything else as JSON with 2-space indentation.
fn render_body<T: Serialize>(response: &T) -> serde_json::Result<String> {
    match serde_json::to_value(response)? {
        Value::String(text) => Ok(text),
        _ => serde_json::to_string_pretty(response),
    }
}

fn error_response(err: ControllerError) -> ApiGatewayProxyResponse {
    match err {
        ControllerError::External(err) => {
            warn!(
                status = err.status_code(),
                error = %err.message(),
                "request rejected"
            );
            ApiGatewayProxyResponse {
                status_code: err.status_code(),
                headers: BTreeMap::new(),
                body: err.message().to_string(),
                is_base64_encoded: false,
            }
        }
        ControllerError::Internal(err) => {
            error!(error = %err, "request failed with internal error");
            internal_server_error()
        }
        ControllerError::Unexpected(err) => {
            error!(error = ?err, "request failed with unclassified error");
            internal_server_error()
        }
    }
}

fn internal_server_error() -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        headers: BTreeMap::new(),
        body: INTERNAL_SERVER_ERROR_BODY.to_string(),
        is_base64_encoded: false,
    }
}
