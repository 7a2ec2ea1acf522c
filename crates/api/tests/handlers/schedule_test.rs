use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{admin_header, open_server, open_slot, request_reservation, slot_starts};

#[tokio::test]
async fn test_create_schedule_slot_returns_visible_slot() {
    let server = open_server();

    let response = server
        .post("/api/schedules")
        .json(&json!({ "timeStart": "2024-09-08 15:00" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let slot = response.json::<Value>();
    assert_eq!(slot["timeStart"], "2024-09-08 15:00");
    assert_eq!(slot["isVisible"], true);
    assert!(Uuid::parse_str(slot["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_create_duplicate_schedule_slot_conflicts() {
    let server = open_server();
    open_slot(&server, "2024-09-08 15:00").await;

    let response = server
        .post("/api/schedules")
        .json(&json!({ "timeStart": "2024-09-08 15:00" }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        "schedule slot already exists at 2024-09-08 15:00:00"
    );
    assert_eq!(slot_starts(&server).await, vec!["2024-09-08 15:00"]);
}

#[tokio::test]
async fn test_create_schedule_slot_rejects_bad_time_format() {
    let server = open_server();

    let response = server
        .post("/api/schedules")
        .json(&json!({ "timeStart": "2024-09-08T15:00:00" }))
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
    assert!(slot_starts(&server).await.is_empty());
}

#[tokio::test]
async fn test_get_schedule_slots_ordered_by_start() {
    let server = open_server();
    open_slot(&server, "2024-09-08 17:00").await;
    open_slot(&server, "2024-09-08 15:00").await;
    open_slot(&server, "2024-09-08 16:00").await;

    assert_eq!(
        slot_starts(&server).await,
        vec!["2024-09-08 15:00", "2024-09-08 16:00", "2024-09-08 17:00"]
    );
}

#[tokio::test]
async fn test_delete_schedule_slot() {
    let server = open_server();
    let slot = open_slot(&server, "2024-09-08 15:00").await;
    let id = slot["id"].as_str().unwrap();

    let response = server.delete(&format!("/api/schedules/{}", id)).await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(slot_starts(&server).await.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_schedule_slot_not_found() {
    let server = open_server();
    let (name, value) = admin_header();

    let response = server
        .delete(&format!("/api/schedules/{}", Uuid::new_v4()))
        .add_header(name, value)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_delete_schedule_slot_held_by_pending_request_conflicts() {
    let server = open_server();
    let slot = open_slot(&server, "2024-09-08 15:00").await;
    let slot_id = slot["id"].as_str().unwrap();
    let reservation_id = request_reservation(&server, "2024-09-08 15:00").await;

    let response = server
        .delete(&format!("/api/schedules/{}", slot_id))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("schedule slot {} is held by reservation {}", slot_id, reservation_id)
    );
    assert_eq!(slot_starts(&server).await, vec!["2024-09-08 15:00"]);
}

#[tokio::test]
async fn test_delete_schedule_slot_after_rejection() {
    let server = open_server();
    let slot = open_slot(&server, "2024-09-08 15:00").await;
    let reservation_id = request_reservation(&server, "2024-09-08 15:00").await;
    server
        .patch(&format!("/api/reservations/{}/reject", reservation_id))
        .await;

    let response = server
        .delete(&format!("/api/schedules/{}", slot["id"].as_str().unwrap()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(slot_starts(&server).await.is_empty());

    let rejected = server
        .get("/api/reservations")
        .add_query_param("status", "rejected")
        .await
        .json::<Vec<Value>>();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["scheduleSlot"]["timeStart"], "2024-09-08 15:00");
    assert_eq!(rejected[0]["scheduleSlot"]["isVisible"], false);
}
