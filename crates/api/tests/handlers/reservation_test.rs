use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{
    open_server, open_slot, request_reservation, reservation_body, slot_starts,
};

#[tokio::test]
async fn test_create_reservation_is_pending() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let body = reservation_body("2024-09-08 20:00");

    let response = server.post("/api/reservations").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let reservation = response.json::<Value>();
    assert_eq!(reservation["status"], "PENDING");
    assert_eq!(reservation["firstName"], body["firstName"]);
    assert_eq!(reservation["email"], body["email"]);
    assert_eq!(reservation["scheduleSlot"]["timeStart"], "2024-09-08 20:00");
    assert_eq!(reservation["durationInMinutes"], Value::Null);
}

#[tokio::test]
async fn test_create_reservation_without_slot() {
    let server = open_server();

    let response = server
        .post("/api/reservations")
        .json(&reservation_body("2024-09-08 20:00"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "no open schedule slot at 2024-09-08 20:00:00"
    );
}

#[tokio::test]
async fn test_accept_reservation_hides_slot() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let id = request_reservation(&server, "2024-09-08 20:00").await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", id))
        .add_query_param("duration", 60)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let reservation = response.json::<Value>();
    assert_eq!(reservation["status"], "ACCEPTED");
    assert_eq!(reservation["durationInMinutes"], 60);
    assert_eq!(reservation["scheduleSlot"]["isVisible"], false);

    let slots = server.get("/api/schedules").await.json::<Vec<Value>>();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["isVisible"], false);
}

#[tokio::test]
async fn test_accept_reservation_absorbs_covered_slots() {
    let server = open_server();
    for start in [
        "2024-09-08 19:00",
        "2024-09-08 20:00",
        "2024-09-08 20:30",
        "2024-09-08 21:00",
    ] {
        open_slot(&server, start).await;
    }
    let id = request_reservation(&server, "2024-09-08 20:00").await;

    server
        .patch(&format!("/api/reservations/{}/accept", id))
        .add_query_param("duration", 60)
        .await;

    assert_eq!(
        slot_starts(&server).await,
        vec!["2024-09-08 19:00", "2024-09-08 20:00", "2024-09-08 21:00"]
    );
}

#[tokio::test]
async fn test_accept_overlapping_reservation_conflicts() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    open_slot(&server, "2024-09-08 20:30").await;
    let late = request_reservation(&server, "2024-09-08 20:30").await;
    let early = request_reservation(&server, "2024-09-08 20:00").await;

    server
        .patch(&format!("/api/reservations/{}/accept", late))
        .add_query_param("duration", 30)
        .await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", early))
        .add_query_param("duration", 60)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let pending = server
        .get("/api/reservations")
        .add_query_param("status", "pending")
        .await
        .json::<Vec<Value>>();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], early.as_str());
    assert_eq!(
        slot_starts(&server).await,
        vec!["2024-09-08 20:00", "2024-09-08 20:30"]
    );
}

#[test_log::test(tokio::test)]
async fn test_accept_over_pending_neighbour_conflicts() {
    let server = open_server();
    open_slot(&server, "2024-09-08 15:00").await;
    open_slot(&server, "2024-09-08 16:00").await;
    let early = request_reservation(&server, "2024-09-08 15:00").await;
    request_reservation(&server, "2024-09-08 16:00").await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", early))
        .add_query_param("duration", 120)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("reservation {} conflicts with another reservation", early)
    );
    assert_eq!(
        slot_starts(&server).await,
        vec!["2024-09-08 15:00", "2024-09-08 16:00"]
    );
}

#[test_log::test(tokio::test)]
async fn test_accept_absorbs_slot_of_rejected_neighbour() {
    let server = open_server();
    open_slot(&server, "2024-09-08 15:00").await;
    open_slot(&server, "2024-09-08 16:00").await;
    let early = request_reservation(&server, "2024-09-08 15:00").await;
    let turned_down = request_reservation(&server, "2024-09-08 16:00").await;
    server
        .patch(&format!("/api/reservations/{}/reject", turned_down))
        .await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", early))
        .add_query_param("duration", 120)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["durationInMinutes"], 120);
    assert_eq!(slot_starts(&server).await, vec!["2024-09-08 15:00"]);

    let all = server.get("/api/reservations").await.json::<Vec<Value>>();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_competing_request_cannot_be_accepted_after_slot_is_taken() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let first = request_reservation(&server, "2024-09-08 20:00").await;
    let second = request_reservation(&server, "2024-09-08 20:00").await;

    server
        .patch(&format!("/api/reservations/{}/accept", first))
        .add_query_param("duration", 60)
        .await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", second))
        .add_query_param("duration", 60)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[rstest]
#[case::zero(0)]
#[case::negative(-15)]
#[tokio::test]
async fn test_accept_with_invalid_duration(#[case] duration: i32) {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let id = request_reservation(&server, "2024-09-08 20:00").await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", id))
        .add_query_param("duration", duration)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_accept_without_duration_is_rejected() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let id = request_reservation(&server, "2024-09-08 20:00").await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", id))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_accept_unknown_reservation_not_found() {
    let server = open_server();

    let response = server
        .patch(&format!("/api/reservations/{}/accept", Uuid::new_v4()))
        .add_query_param("duration", 60)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reject_reservation_keeps_slot_open() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let id = request_reservation(&server, "2024-09-08 20:00").await;

    let response = server
        .patch(&format!("/api/reservations/{}/reject", id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "REJECTED");

    let retry = server
        .post("/api/reservations")
        .json(&reservation_body("2024-09-08 20:00"))
        .await;
    assert_eq!(retry.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_decided_reservation_cannot_be_decided_again() {
    let server = open_server();
    open_slot(&server, "2024-09-08 20:00").await;
    let id = request_reservation(&server, "2024-09-08 20:00").await;

    server
        .patch(&format!("/api/reservations/{}/reject", id))
        .await;

    let response = server
        .patch(&format!("/api/reservations/{}/accept", id))
        .add_query_param("duration", 60)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("reservation {} has already been decided", id)
    );
}

#[tokio::test]
async fn test_list_reservations_by_status() {
    let server = open_server();
    open_slot(&server, "2024-09-08 18:00").await;
    open_slot(&server, "2024-09-08 20:00").await;
    let accepted = request_reservation(&server, "2024-09-08 18:00").await;
    request_reservation(&server, "2024-09-08 20:00").await;

    server
        .patch(&format!("/api/reservations/{}/accept", accepted))
        .add_query_param("duration", 60)
        .await;

    let all = server.get("/api/reservations").await.json::<Vec<Value>>();
    assert_eq!(all.len(), 2);

    let only_accepted = server
        .get("/api/reservations")
        .add_query_param("status", "Accepted")
        .await
        .json::<Vec<Value>>();
    assert_eq!(only_accepted.len(), 1);
    assert_eq!(only_accepted[0]["id"], accepted.as_str());

    let rejected = server
        .get("/api/reservations")
        .add_query_param("status", "REJECTED")
        .await
        .json::<Vec<Value>>();
    assert!(rejected.is_empty());
}

#[tokio::test]
async fn test_list_reservations_with_unknown_status() {
    let server = open_server();

    let response = server
        .get("/api/reservations")
        .add_query_param("status", "maybe")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "wrong status: maybe");
}
