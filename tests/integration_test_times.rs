mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_wall_clock_times_interpreted_in_center_timezone() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    // June in Paris is UTC+2: 10:00 local is 08:00Z.
    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 10:00", "endTime": "10/06/2030 12:00"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body[0]["startTime"], "2030-06-10T08:00:00Z");
    assert_eq!(body[0]["endTime"], "2030-06-10T10:00:00Z");
}

#[tokio::test]
async fn test_iso_and_wall_clock_forms_mix() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "2030-06-10T08:00:00+02:00", "endTime": "10/06/2030 09:00"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body[0]["startTime"], "2030-06-10T06:00:00Z");
    assert_eq!(body[0]["endTime"], "2030-06-10T07:00:00Z");
}

#[tokio::test]
async fn test_unparseable_time_rejected() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "June 10th at 9", "endTime": "10/06/2030 10:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_before_start_rejected() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 14:00", "endTime": "10/06/2030 13:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_midnight_end_rolls_to_next_day() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    // End given as 00:00 of the same day means "until midnight".
    let res = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 22:00", "endTime": "10/06/2030 00:00"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    // Midnight Paris on June 11 is 22:00Z June 10.
    assert_eq!(body[0]["startTime"], "2030-06-10T20:00:00Z");
    assert_eq!(body[0]["endTime"], "2030-06-10T22:00:00Z");
}

#[tokio::test]
async fn test_list_filters_by_room_and_date() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 09:00", "endTime": "10/06/2030 10:00"
    })).await;
    app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "11/06/2030 09:00", "endTime": "11/06/2030 10:00"
    })).await;

    let all = parse_body(app.get(&format!("/api/v1/reservations?roomId={}", room_id)).await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let one_day = parse_body(app.get(&format!("/api/v1/reservations?roomId={}&date=2030-06-10", room_id)).await).await;
    let day = one_day.as_array().unwrap();
    assert_eq!(day.len(), 1);
    assert!(day[0]["startTime"].as_str().unwrap().starts_with("2030-06-10"));

    // Embedded display summaries come along.
    assert_eq!(day[0]["room"]["name"], "Main Hall");
    assert_eq!(day[0]["activity"]["name"], "Yoga");
}
