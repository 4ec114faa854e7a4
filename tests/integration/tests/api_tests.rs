//! API Integration Tests
//!
//! Each test starts its own server over the seed organisation. No homeserver
//! is configured unless the test scripts one.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, ScriptedHomeserver, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/nope").await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Employee Tests
// ============================================================================

#[tokio::test]
async fn test_list_employees() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/employees").await.unwrap();
    let employees: Vec<EmployeeResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(employees.first().map(|e| e.id.as_str()), Some("emp-vadim"));
    assert!(employees.iter().any(|e| e.id == "emp-jarvis"));
}

#[tokio::test]
async fn test_get_employee_with_relations() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/employees/emp-sage").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["id"], "emp-sage");
    assert_eq!(body["department"]["id"], "dept-sales");
    assert_eq!(body["manager"]["id"], "emp-jarvis");
    assert_eq!(body["direct_reports"][0]["id"], "emp-closer");
}

#[tokio::test]
async fn test_get_missing_employee() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/employees/emp-nobody").await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_update_delete_employee() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateEmployeeRequest::unique();

    let response = server.post("/api/employees", &request).await.unwrap();
    let created: EmployeeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.name, request.name);
    assert_eq!(created.initials, "TA");
    assert_eq!(created.employee_type, "ai");
    assert_eq!(created.status, "unavailable");
    assert!(!created.is_council_member);

    let path = format!("/api/employees/{}", created.id);
    let response = server
        .patch(&path, &json!({ "title": "Analyst", "manager_id": null }))
        .await
        .unwrap();
    let updated: EmployeeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Analyst");
    assert_eq!(updated.manager_id, None);
    assert_eq!(updated.department_id.as_deref(), Some("dept-research"));

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_create_employee_validation() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/employees", &json!({ "name": "   ", "title": "Analyst" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let response = server
        .post("/api/employees", &json!({ "name": "Ada" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_BODY")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_missing_employee() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .patch("/api/employees/emp-nobody", &json!({ "title": "Ghost" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Department Tests
// ============================================================================

#[tokio::test]
async fn test_get_department_with_staff() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/departments/dept-creative").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["name"], "Creative");
    assert_eq!(body["head"]["id"], "emp-pixel");
    let staff: Vec<&str> = body["employees"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(staff, ["emp-pixel", "emp-nova", "emp-vibe"]);
}

#[tokio::test]
async fn test_create_update_delete_department() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateDepartmentRequest::unique();

    let response = server.post("/api/departments", &request).await.unwrap();
    let created: DepartmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.name, request.name);
    assert_eq!(created.icon, "📁");
    assert_eq!(
        created.parent_department_id.as_deref(),
        Some("dept-development")
    );
    assert_eq!(created.head_id, None);

    let path = format!("/api/departments/{}", created.id);
    let response = server
        .patch(&path, &json!({ "head_id": "emp-clawd", "parent_department_id": null }))
        .await
        .unwrap();
    let updated: DepartmentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.head_id.as_deref(), Some("emp-clawd"));
    assert_eq!(updated.parent_department_id, None);

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Org Chart Tests
// ============================================================================

#[tokio::test]
async fn test_org_chart() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/org-chart").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["ceo"]["id"], "emp-vadim");
    assert_eq!(body["council"].as_array().unwrap().len(), 3);
    assert_eq!(body["departments"].as_array().unwrap().len(), 6);
    let unassigned: Vec<&str> = body["unassigned"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(unassigned, ["emp-jarvis", "emp-oracle"]);
}

#[tokio::test]
async fn test_council() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/council").await.unwrap();
    let council: Vec<EmployeeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(council.len(), 3);
    assert!(council.iter().all(|e| e.is_council_member));
}

// ============================================================================
// Presence Tests
// ============================================================================

#[tokio::test]
async fn test_presence_without_homeserver() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/presence/@jarvis:localhost").await.unwrap();
    let body: PresenceResponseBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.matrix_user_id, "@jarvis:localhost");
    assert_eq!(body.status, "unavailable");
    assert!(!body.configured);
}

#[tokio::test]
async fn test_presence_from_homeserver() {
    let homeserver = ScriptedHomeserver::default();
    homeserver.set("@jarvis:localhost", "online");
    let server = TestServer::start_with_presence(homeserver.presence_service(Duration::from_secs(60)))
        .await
        .expect("Failed to start server");
    let runtime = server.start_presence().await.unwrap();

    let response = server.get("/api/presence/@jarvis:localhost").await.unwrap();
    let body: PresenceResponseBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "online");
    assert!(body.configured);

    // Failed lookup with nothing cached
    let response = server.get("/api/presence/@ghost:localhost").await.unwrap();
    let body: PresenceResponseBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "unavailable");

    runtime.shutdown();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_message() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_as(
            "/api/messages",
            "emp-vadim",
            &SendMessageRequest::to("emp-jarvis", "Status report?"),
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.sender_id, "emp-vadim");
    assert_eq!(message.recipient_id, "emp-jarvis");
    assert_eq!(message.content, "Status report?");
    assert!(!message.id.is_empty());
    assert!(!message.timestamp.is_empty());
}

#[tokio::test]
async fn test_send_message_without_sender() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/messages", &SendMessageRequest::to("emp-jarvis", "hi"))
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.sender_id, "anonymous");
}
