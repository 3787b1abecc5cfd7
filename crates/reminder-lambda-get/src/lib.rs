//! AWS Lambda function returning a single reminder.
//!
//! `GET /v1/reminder/{id}` answers with the reminder's name and description,
//! or 404 when no reminder has that id.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::info;

use reminder_lambda_shared::{
    create_api_handler, init_tracing, ApiController, ApiGatewayProxyRequest, ControllerError,
    RouteSpec, Schema, SchemaError,
};
use reminder_lib::{GetReminderParams, GetReminderResponse, ReminderService, StoreConfig};

/// Route template this function is mounted on.
pub const ROUTE_PATH: &str = "/v1/reminder/{id}";

/// Looks a reminder up by the `id` path parameter.
#[derive(Debug, Clone)]
pub struct GetReminderController {
    service: ReminderService,
}

impl GetReminderController {
    pub fn new(service: ReminderService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ApiController for GetReminderController {
    type Response = GetReminderResponse;

    async fn process_event(
        &self,
        event: &ApiGatewayProxyRequest,
        _schema: Option<&Schema>,
    ) -> Result<GetReminderResponse, ControllerError> {
        let params = GetReminderParams {
            id: event.require_path_parameter("id")?.to_string(),
        };
        Ok(self.service.get(&params).await?)
    }
}

/// JSON Schema of the response body.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" }
        },
        "required": ["name", "description"]
    })
}

pub fn route_spec() -> Result<RouteSpec, SchemaError> {
    Ok(RouteSpec::new("Reminder Get")
        .description("Get a reminder by ID.")
        .response_body(Schema::new(response_schema())?, "application/json")
        .error_codes([
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ]))
}

/// Resolve the store from the environment and serve the route.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    let config = StoreConfig::from_env()?;
    let store = config.open_store()?;
    info!(table = %config.table, "reminder store ready");

    let controller = GetReminderController::new(ReminderService::new(Arc::new(store)));
    create_api_handler(controller, route_spec()?).run().await
}
