mod common;

use axum::http::StatusCode;
use chrono::{Duration, SecondsFormat, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

fn rfc3339(ts: chrono::DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;
    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_now_showing_lists_only_current_reservations() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let now = Utc::now();

    // Running right now.
    let current = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": rfc3339(now - Duration::minutes(30)),
        "endTime": rfc3339(now + Duration::minutes(30)),
        "title": "Open Studio"
    })).await;
    assert_eq!(current.status(), StatusCode::CREATED);

    // Later today.
    let later = app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": rfc3339(now + Duration::hours(3)),
        "endTime": rfc3339(now + Duration::hours(4))
    })).await;
    assert_eq!(later.status(), StatusCode::CREATED);

    // Public, no auth.
    let res = app.get("/api/v1/display/now").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Open Studio");
    assert_eq!(entries[0]["room"]["name"], "Main Hall");
}

#[tokio::test]
async fn test_history_records_reservation_lifecycle() {
    let app = TestApp::new().await;
    let auth = app.login("admin", "admin").await;
    let (room_id, activity_id) = app.seed_room_and_activity(&auth).await;

    let created = parse_body(app.post(&auth, "/api/v1/reservations", json!({
        "roomId": room_id, "activityId": activity_id,
        "startTime": "10/06/2030 09:00", "endTime": "10/06/2030 10:00"
    })).await).await;
    let id = created[0]["id"].as_str().unwrap().to_string();

    app.put(&auth, &format!("/api/v1/reservations/{}", id), json!({
        "title": "Renamed"
    })).await;
    app.delete(&auth, &format!("/api/v1/reservations/{}", id)).await;

    let res = app.get_auth(&auth, "/api/v1/history").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let actions: Vec<&str> = body.as_array().unwrap().iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"create"));
    assert!(actions.contains(&"update"));
    assert!(actions.contains(&"delete"));

    // Entries carry the acting user's name.
    assert!(body.as_array().unwrap().iter().all(|e| e["username"] == "admin"));
}

#[tokio::test]
async fn test_history_requires_staff_role() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin").await;

    let res = app.post(&admin, "/api/v1/users", json!({
        "username": "plain", "password": "secret123", "role": "user"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let plain = app.login("plain", "secret123").await;

    let denied = app.get_auth(&plain, "/api/v1/history").await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}
