mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_weekly_expansion_sunday_based_weeks() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    // Monday Jan 1 2024 through Monday Jan 15, Mondays and Wednesdays.
    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "01/01/2024 10:00", "endTime": "01/01/2024 11:00",
        "title": "Weekly Yoga",
        "recurrence": {
            "type": "weekly", "interval": 1,
            "endDate": "2024-01-15", "daysOfWeek": [1, 3]
        }
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let occurrences = body.as_array().unwrap();
    assert_eq!(occurrences.len(), 5, "expected Jan 1, 3, 8, 10, 15");

    // First occurrence is the series parent and carries the rule.
    assert!(occurrences[0]["recurrence"].is_object());
    assert!(occurrences[0]["parentReservationId"].is_null());

    let parent_id = occurrences[0]["id"].as_str().unwrap();
    for child in &occurrences[1..] {
        assert_eq!(child["parentReservationId"].as_str().unwrap(), parent_id);
        assert!(child["recurrence"].is_null());
    }

    let days: Vec<&str> = occurrences.iter()
        .map(|o| o["startTime"].as_str().unwrap())
        .collect();
    assert!(days[0].starts_with("2024-01-01"));
    assert!(days[1].starts_with("2024-01-03"));
    assert!(days[2].starts_with("2024-01-08"));
    assert!(days[3].starts_with("2024-01-10"));
    assert!(days[4].starts_with("2024-01-15"));
}

#[tokio::test]
async fn test_daily_expansion() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 09:00", "endTime": "10/06/2030 10:00",
        "recurrence": { "type": "daily", "interval": 1, "endDate": "2030-06-12" }
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_monthly_expansion_clamps_short_months() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    // Jan 31 steps to Feb 28 (clamped), then Mar 28.
    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "31/01/2030 14:00", "endTime": "31/01/2030 15:00",
        "recurrence": { "type": "monthly", "interval": 1, "endDate": "2030-03-31" }
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let occurrences = body.as_array().unwrap();
    assert_eq!(occurrences.len(), 3);
    assert!(occurrences[1]["startTime"].as_str().unwrap().starts_with("2030-02-28"));
    assert!(occurrences[2]["startTime"].as_str().unwrap().starts_with("2030-03-28"));
}

#[tokio::test]
async fn test_weekly_without_weekdays_rejected() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 09:00", "endTime": "10/06/2030 10:00",
        "recurrence": { "type": "weekly", "interval": 1, "endDate": "2030-06-30", "daysOfWeek": [] }
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recurring_batch_is_all_or_nothing() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    // Occupy the middle occurrence's slot first.
    let blocker = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "11/06/2030 09:00", "endTime": "11/06/2030 10:00"
    })).await;
    assert_eq!(blocker.status(), StatusCode::CREATED);

    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 09:00", "endTime": "10/06/2030 10:00",
        "recurrence": { "type": "daily", "interval": 1, "endDate": "2030-06-13" }
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Nothing from the failed batch may remain.
    let list = parse_body(app.get(&format!("/api/v1/reservations?roomId={}", room_id)).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_interval_skips_weeks() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    // Every second week, Mondays only: Jan 1, Jan 15, Jan 29.
    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "01/01/2024 10:00", "endTime": "01/01/2024 11:00",
        "recurrence": {
            "type": "weekly", "interval": 2,
            "endDate": "2024-01-31", "daysOfWeek": [1]
        }
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let occurrences = body.as_array().unwrap();
    assert_eq!(occurrences.len(), 3);
    assert!(occurrences[1]["startTime"].as_str().unwrap().starts_with("2024-01-15"));
    assert!(occurrences[2]["startTime"].as_str().unwrap().starts_with("2024-01-29"));
}
