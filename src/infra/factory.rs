use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use argon2::{Argon2, PasswordHasher};
use argon2::password_hash::{SaltString, rand_core::OsRng};

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::user::{Role, User};
use crate::domain::ports::UserRepository;
use crate::domain::services::auth_service::AuthService;
use crate::infra::repositories::{
    postgres_room_repo::PostgresRoomRepo, postgres_activity_repo::PostgresActivityRepo,
    postgres_reservation_repo::PostgresReservationRepo, postgres_user_repo::PostgresUserRepo,
    postgres_auth_repo::PostgresAuthRepo, postgres_history_repo::PostgresHistoryRepo,
    postgres_lock_repo::PostgresLockRepo,
    sqlite_room_repo::SqliteRoomRepo, sqlite_activity_repo::SqliteActivityRepo,
    sqlite_reservation_repo::SqliteReservationRepo, sqlite_user_repo::SqliteUserRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_history_repo::SqliteHistoryRepo,
    sqlite_lock_repo::SqliteLockRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));

        seed_admin_user(user_repo.as_ref(), config).await;

        AppState {
            config: config.clone(),
            room_repo: Arc::new(PostgresRoomRepo::new(pool.clone())),
            activity_repo: Arc::new(PostgresActivityRepo::new(pool.clone())),
            reservation_repo: Arc::new(PostgresReservationRepo::new(pool.clone())),
            user_repo,
            auth_repo,
            history_repo: Arc::new(PostgresHistoryRepo::new(pool.clone())),
            lock_repo: Arc::new(PostgresLockRepo::new(pool.clone())),
            auth_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));

        seed_admin_user(user_repo.as_ref(), config).await;

        AppState {
            config: config.clone(),
            room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
            activity_repo: Arc::new(SqliteActivityRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            user_repo,
            auth_repo,
            history_repo: Arc::new(SqliteHistoryRepo::new(pool.clone())),
            lock_repo: Arc::new(SqliteLockRepo::new(pool.clone())),
            auth_service,
        }
    }
}

/// First boot only: an empty users table gets a superadmin account so the
/// center staff can log in and create the real accounts.
pub async fn seed_admin_user(user_repo: &dyn UserRepository, config: &Config) {
    let count = user_repo.count().await.expect("Failed to count users");
    if count > 0 {
        return;
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(config.admin_password.as_bytes(), &salt)
        .expect("Failed to hash admin password")
        .to_string();

    let admin = User::new(
        "admin".to_string(),
        password_hash,
        "admin@localhost".to_string(),
        Role::Superadmin,
    );

    user_repo.create(&admin).await.expect("Failed to seed admin user");
    info!("Seeded initial superadmin user 'admin'");
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
