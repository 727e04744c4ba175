use reservation_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::seed_admin_user,
    infra::repositories::{
        sqlite_room_repo::SqliteRoomRepo,
        sqlite_activity_repo::SqliteActivityRepo,
        sqlite_reservation_repo::SqliteReservationRepo,
        sqlite_user_repo::SqliteUserRepo,
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_history_repo::SqliteHistoryRepo,
        sqlite_lock_repo::SqliteLockRepo,
    },
    domain::services::auth_service::AuthService,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::str::FromStr;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use tower::ServiceExt;
use serde_json::Value;

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            timezone: "Europe/Paris".parse().unwrap(),
            admin_password: "admin".to_string(),
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));

        seed_admin_user(user_repo.as_ref(), &config).await;

        let state = Arc::new(AppState {
            config: config.clone(),
            room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
            activity_repo: Arc::new(SqliteActivityRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            user_repo,
            auth_repo,
            history_repo: Arc::new(SqliteHistoryRepo::new(pool.clone())),
            lock_repo: Arc::new(SqliteLockRepo::new(pool.clone())),
            auth_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Authenticated POST with JSON body.
    #[allow(dead_code)]
    pub async fn post(&self, auth: &AuthHeaders, uri: &str, body: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())).unwrap()
        ).await.unwrap()
    }

    /// Authenticated PUT with JSON body.
    #[allow(dead_code)]
    pub async fn put(&self, auth: &AuthHeaders, uri: &str, body: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("PUT").uri(uri)
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())).unwrap()
        ).await.unwrap()
    }

    /// Authenticated DELETE.
    #[allow(dead_code)]
    pub async fn delete(&self, auth: &AuthHeaders, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("DELETE").uri(uri)
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    /// Unauthenticated GET.
    #[allow(dead_code)]
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    /// Authenticated GET.
    #[allow(dead_code)]
    pub async fn get_auth(&self, auth: &AuthHeaders, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    /// Creates a room and an activity, returning their ids. Most
    /// reservation tests need both as a fixture.
    #[allow(dead_code)]
    pub async fn seed_room_and_activity(&self, auth: &AuthHeaders) -> (String, String) {
        let room_res = self.post(auth, "/api/v1/rooms", serde_json::json!({
            "name": "Main Hall",
            "capacity": 40,
            "color": "#3174ad",
            "equipment": ["projector"]
        })).await;
        assert!(room_res.status().is_success(), "room fixture failed: {}", room_res.status());
        let room = parse_body(room_res).await;

        let act_res = self.post(auth, "/api/v1/activities", serde_json::json!({
            "name": "Yoga",
            "description": "Gentle yoga",
            "instructor": "Claire",
            "category": "wellness",
            "requirements": ["mats"]
        })).await;
        assert!(act_res.status().is_success(), "activity fixture failed: {}", act_res.status());
        let activity = parse_body(act_res).await;

        (
            room["id"].as_str().unwrap().to_string(),
            activity["id"].as_str().unwrap().to_string(),
        )
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
