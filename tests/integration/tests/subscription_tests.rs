//! Subscription socket integration tests
//!
//! Run with: cargo test -p integration-tests --test subscription_tests

use std::time::Duration;

use integration_tests::{assert_status, fixtures::*, ScriptedHomeserver, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_ping_pong() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut ws = server.subscriptions().await.unwrap();

    ws.send(json!({ "type": "ping" })).await.unwrap();
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "pong");
}

#[tokio::test]
async fn test_invalid_frames_are_reported() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut ws = server.subscriptions().await.unwrap();

    ws.send(json!({ "type": "launch" })).await.unwrap();
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "error");
    assert!(frame.get("id").is_none());

    ws.send(json!({ "type": "subscribe", "id": "s1", "topic": "nope" }))
        .await
        .unwrap();
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "error");
    assert_eq!(frame["id"], "s1");

    // messageSent needs a recipient
    ws.send(json!({ "type": "subscribe", "id": "s2", "topic": "messageSent" }))
        .await
        .unwrap();
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "error");
    assert_eq!(frame["id"], "s2");
}

#[tokio::test]
async fn test_messages_reach_only_their_recipient() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut jarvis = server.subscriptions().await.unwrap();
    jarvis
        .subscribe("inbox", "messageSent", Some("emp-jarvis"))
        .await
        .unwrap();
    let mut atlas = server.subscriptions().await.unwrap();
    atlas
        .subscribe("inbox", "messageSent", Some("emp-atlas"))
        .await
        .unwrap();

    let response = server
        .post_as(
            "/api/messages",
            "emp-vadim",
            &SendMessageRequest::to("emp-jarvis", "Quarterly plan?"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let frame = jarvis.next_frame().await.unwrap();
    assert_eq!(frame["type"], "next");
    assert_eq!(frame["id"], "inbox");
    assert_eq!(frame["payload"]["sender_id"], "emp-vadim");
    assert_eq!(frame["payload"]["recipient_id"], "emp-jarvis");
    assert_eq!(frame["payload"]["content"], "Quarterly plan?");

    atlas.assert_silent(Duration::from_millis(200)).await.unwrap();
}

#[tokio::test]
async fn test_crud_events_and_unsubscribe() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut ws = server.subscriptions().await.unwrap();
    ws.subscribe("created", "employeeCreated", None).await.unwrap();
    ws.subscribe("deleted", "employeeDeleted", None).await.unwrap();

    let response = server
        .post("/api/employees", &CreateEmployeeRequest::unique())
        .await
        .unwrap();
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "next");
    assert_eq!(frame["id"], "created");
    assert_eq!(frame["payload"]["id"], id.as_str());

    ws.send(json!({ "type": "unsubscribe", "id": "deleted" }))
        .await
        .unwrap();
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "complete");
    assert_eq!(frame["id"], "deleted");

    let response = server.delete(&format!("/api/employees/{id}")).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    ws.assert_silent(Duration::from_millis(200)).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_subscription_id() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut ws = server.subscriptions().await.unwrap();
    ws.subscribe("s1", "departmentCreated", None).await.unwrap();

    ws.send(json!({ "type": "subscribe", "id": "s1", "topic": "departmentDeleted" }))
        .await
        .unwrap();
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["type"], "error");
    assert_eq!(frame["id"], "s1");
}

#[tokio::test]
async fn test_presence_change_reaches_subscribers() {
    let homeserver = ScriptedHomeserver::default();
    homeserver.set("@jarvis:localhost", "online");
    homeserver.set("@atlas:localhost", "offline");
    homeserver.set("@clawd:localhost", "offline");

    let server = TestServer::start_with_presence(homeserver.presence_service(Duration::from_secs(60)))
        .await
        .expect("Failed to start server");
    let mut ws = server.subscriptions().await.unwrap();
    ws.subscribe("status", "employeeStatusChanged", None)
        .await
        .unwrap();

    // The first sweep reports every tracked user
    let runtime = server.start_presence().await.unwrap();

    let mut seen = Vec::new();
    for _ in 0..3 {
        let frame = ws.next_frame().await.unwrap();
        assert_eq!(frame["type"], "next");
        let payload = &frame["payload"];
        assert_eq!(payload["employee"]["id"], payload["employee_id"]);
        seen.push((
            payload["employee_id"].as_str().unwrap().to_string(),
            payload["status"].as_str().unwrap().to_string(),
        ));
    }
    seen.sort();
    assert_eq!(
        seen,
        [
            ("emp-atlas".to_string(), "offline".to_string()),
            ("emp-clawd".to_string(), "offline".to_string()),
            ("emp-jarvis".to_string(), "online".to_string()),
        ]
    );

    let response = server.get("/api/employees/emp-jarvis").await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "online");

    runtime.shutdown();
}

#[tokio::test]
async fn test_presence_query_does_not_swallow_status_change() {
    let homeserver = ScriptedHomeserver::default();
    homeserver.set("@jarvis:localhost", "online");
    homeserver.set("@atlas:localhost", "offline");
    homeserver.set("@clawd:localhost", "offline");
    let presence = homeserver.presence_service(Duration::from_secs(60));

    let server = TestServer::start_with_presence(presence.clone())
        .await
        .expect("Failed to start server");
    let mut ws = server.subscriptions().await.unwrap();
    ws.subscribe("status", "employeeStatusChanged", None)
        .await
        .unwrap();

    let runtime = server.start_presence().await.unwrap();
    let mut online_seen = false;
    for _ in 0..3 {
        let frame = ws.next_frame().await.unwrap();
        if frame["payload"]["employee_id"] == "emp-jarvis" {
            assert_eq!(frame["payload"]["status"], "online");
            online_seen = true;
        }
    }
    assert!(online_seen);

    // A client asks between sweeps and already sees the new status
    homeserver.set("@jarvis:localhost", "offline");
    let response = server.get("/api/presence/@jarvis:localhost").await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "offline");

    // The next sweep still reports the transition
    presence.poll_all_presences().await;
    let frame = ws.next_frame().await.unwrap();
    assert_eq!(frame["payload"]["employee_id"], "emp-jarvis");
    assert_eq!(frame["payload"]["status"], "offline");

    let response = server.get("/api/employees/emp-jarvis").await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "offline");

    runtime.shutdown();
}
