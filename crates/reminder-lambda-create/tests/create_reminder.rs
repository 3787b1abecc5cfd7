use std::sync::Arc;

use reminder_lambda_create::{route_spec, CreateReminderController, ROUTE_PATH};
use reminder_lambda_shared::test_utils::{api_request, mock_request_id};
use reminder_lambda_shared::{create_api_handler, ApiHandler};
use reminder_lib::{GetReminderParams, InMemoryStore, ReminderService};
use serde_json::Value;

fn handler() -> (ApiHandler<CreateReminderController>, ReminderService) {
    let service = ReminderService::new(Arc::new(InMemoryStore::new()));
    let controller = CreateReminderController::new(service.clone());
    (create_api_handler(controller, route_spec().unwrap()), service)
}

#[tokio::test]
async fn creates_reminder_and_returns_its_id() {
    let (handler, service) = handler();
    let request = api_request("POST", ROUTE_PATH)
        .header("Content-Type", "application/json")
        .body(r#"{"name":"dentist","description":"Tuesday at 9"}"#)
        .request_id(&mock_request_id("create-ok"))
        .build();

    let response = handler.handle(&request).await;

    assert_eq!(response.status_code, 201);
    assert_eq!(response.headers["content-type"], "application/json");
    let body: Value = serde_json::from_str(&response.body).unwrap();
    let id = body["id"].as_str().unwrap().to_string();

    let stored = service.get(&GetReminderParams { id }).await.unwrap();
    assert_eq!(stored.name, "dentist");
    assert_eq!(stored.description, "Tuesday at 9");
}

#[tokio::test]
async fn reports_every_missing_field() {
    let (handler, _) = handler();
    let request = api_request("POST", ROUTE_PATH).body("{}").build();

    let response = handler.handle(&request).await;

    assert_eq!(response.status_code, 400);
    let mut lines = response.body.lines();
    assert_eq!(lines.next(), Some("Malformed body:"));
    let rest: Vec<&str> = lines.collect();
    assert_eq!(rest.len(), 2);
    assert!(rest.iter().any(|line| line.contains("\"name\"")));
    assert!(rest.iter().any(|line| line.contains("\"description\"")));
}

#[tokio::test]
async fn rejects_unparseable_body() {
    let (handler, _) = handler();
    let request = api_request("POST", ROUTE_PATH).body("{not json").build();

    let response = handler.handle(&request).await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.starts_with("Malformed body:\n"));
}

#[tokio::test]
async fn rejects_missing_body() {
    let (handler, _) = handler();
    let response = handler.handle(&api_request("POST", ROUTE_PATH).build()).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, "Request body is required.");
}

#[test]
fn route_spec_declares_bodies_and_created_status() {
    let spec = route_spec().unwrap();
    assert_eq!(spec.summary, "Create Reminder");
    assert_eq!(spec.success_code, 201);
    assert_eq!(spec.request_content_type(), Some("application/json"));
    assert_eq!(spec.response_content_type(), Some("application/json"));
}
