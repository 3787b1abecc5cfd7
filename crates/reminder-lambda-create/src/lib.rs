//! AWS Lambda function creating reminders.
//!
//! `POST /v1/reminder` validates the body against [`request_schema`], stores
//! the reminder under a new id and answers `201 Created` with that id.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::info;

use reminder_lambda_shared::{
    create_api_handler, init_tracing, validate, ApiController, ApiGatewayProxyRequest,
    ControllerError, ExternalError, InternalError, RouteSpec, Schema, SchemaError,
};
use reminder_lib::{CreateReminderParams, CreateReminderResponse, ReminderService, StoreConfig};

pub const ROUTE_PATH: &str = "/v1/reminder";

/// Validates the request body and stores a new reminder.
#[derive(Debug, Clone)]
pub struct CreateReminderController {
    service: ReminderService,
}

impl CreateReminderController {
    pub fn new(service: ReminderService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ApiController for CreateReminderController {
    type Response = CreateReminderResponse;

    async fn process_event(
        &self,
        event: &ApiGatewayProxyRequest,
        schema: Option<&Schema>,
    ) -> Result<CreateReminderResponse, ControllerError> {
        let schema =
            schema.ok_or_else(|| InternalError::new("create route has no request schema"))?;
        let body = event
            .body
            .as_deref()
            .ok_or_else(|| ExternalError::bad_request("Request body is required."))?;

        let params: CreateReminderParams = validate(body, schema)?;
        Ok(self.service.create(params).await?)
    }
}

pub fn request_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" }
        },
        "required": ["name", "description"]
    })
}

pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" }
        },
        "required": ["id"]
    })
}

pub fn route_spec() -> Result<RouteSpec, SchemaError> {
    Ok(RouteSpec::new("Create Reminder")
        .description("Creates a reminder object.")
        .request_body(Schema::new(request_schema())?, "application/json")
        .response_body(Schema::new(response_schema())?, "application/json")
        .success_code(StatusCode::CREATED)
        .error_codes([
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::INTERNAL_SERVER_ERROR,
        ]))
}

/// Resolve the store from the environment and serve the route.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    let config = StoreConfig::from_env()?;
    let store = config.open_store()?;
    info!(table = %config.table, "reminder store ready");

    let controller = CreateReminderController::new(ReminderService::new(Arc::new(store)));
    create_api_handler(controller, route_spec()?).run().await
}
