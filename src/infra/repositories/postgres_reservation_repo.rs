use crate::domain::{models::reservation::Reservation, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use chrono::{DateTime, Utc};

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assert_slot_free(
        tx: &mut Transaction<'_, Postgres>,
        reservation: &Reservation,
    ) -> Result<(), AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM reservations
             WHERE room_id = $1 AND id != $2 AND start_time < $3 AND end_time > $4"
        )
            .bind(&reservation.room_id)
            .bind(&reservation.id)
            .bind(reservation.end_time)
            .bind(reservation.start_time)
            .fetch_one(&mut **tx)
            .await
            .map_err(AppError::Database)?;

        if row.get::<i64, _>("count") > 0 {
            return Err(AppError::Conflict(format!(
                "Room is already booked on {}",
                reservation.start_time.format("%d/%m/%Y")
            )));
        }
        Ok(())
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        reservation: &Reservation,
    ) -> Result<Reservation, AppError> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, room_id, activity_id, start_time, end_time, title, description, notes, created_by, created_at, parent_reservation_id, recurrence_json)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *"
        )
            .bind(&reservation.id).bind(&reservation.room_id).bind(&reservation.activity_id)
            .bind(reservation.start_time).bind(reservation.end_time)
            .bind(&reservation.title).bind(&reservation.description).bind(&reservation.notes)
            .bind(&reservation.created_by).bind(reservation.created_at)
            .bind(&reservation.parent_reservation_id).bind(&reservation.recurrence_json)
            .fetch_one(&mut **tx)
            .await
            .map_err(AppError::Database)
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        Self::assert_slot_free(&mut tx, reservation).await?;
        let created = Self::insert(&mut tx, reservation).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn create_batch(&self, reservations: &[Reservation]) -> Result<Vec<Reservation>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut created = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            Self::assert_slot_free(&mut tx, reservation).await?;
            created.push(Self::insert(&mut tx, reservation).await?);
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY start_time ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_room(&self, room_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE room_id = $1 ORDER BY start_time ASC")
            .bind(room_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE start_time < $1 AND end_time > $2 ORDER BY start_time ASC")
            .bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        Self::assert_slot_free(&mut tx, reservation).await?;
        let updated = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations
             SET room_id=$1, activity_id=$2, start_time=$3, end_time=$4, title=$5, description=$6, notes=$7
             WHERE id=$8
             RETURNING *"
        )
            .bind(&reservation.room_id).bind(&reservation.activity_id)
            .bind(reservation.start_time).bind(reservation.end_time)
            .bind(&reservation.title).bind(&reservation.description).bind(&reservation.notes)
            .bind(&reservation.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reservation not found".into()));
        }
        Ok(())
    }

    async fn delete_series(&self, parent_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1 OR parent_reservation_id = $1")
            .bind(parent_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reservation not found".into()));
        }
        Ok(result.rows_affected())
    }
}
