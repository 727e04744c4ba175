use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{activity, auth, health, history, lock, member, reservation, room};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Rooms
        .route("/api/v1/rooms", get(room::list_rooms).post(room::create_room))
        .route("/api/v1/rooms/{id}", get(room::get_room).put(room::update_room).delete(room::delete_room))

        // Activities
        .route("/api/v1/activities", get(activity::list_activities).post(activity::create_activity))
        .route("/api/v1/activities/{id}", get(activity::get_activity).put(activity::update_activity).delete(activity::delete_activity))

        // Users
        .route("/api/v1/users", get(member::list_users).post(member::create_user))
        .route("/api/v1/users/{user_id}", delete(member::delete_user))

        // Reservations
        .route("/api/v1/reservations", get(reservation::list_reservations).post(reservation::create_reservation))
        .route("/api/v1/reservations/{id}", get(reservation::get_reservation).put(reservation::update_reservation).delete(reservation::delete_reservation))
        .route("/api/v1/reservations/{id}/reschedule", post(reservation::reschedule_reservation))
        .route("/api/v1/reservations/{id}/lock", post(lock::claim_lock).delete(lock::release_lock))

        // Public lobby display
        .route("/api/v1/display/now", get(reservation::now_showing))

        // Audit trail
        .route("/api/v1/history", get(history::list_history))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
