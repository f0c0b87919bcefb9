//! Reservation repository
//!
//! Rows are denormalized: one row per review of the reserved property, so a
//! property with several reviews repeats the same reservation.

use chrono::NaiveDate;
use lightbnb_core::{ValidationError, DEFAULT_LIMIT};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::properties::Property;
use crate::error::DbError;

/// Reservation joined with its property and one of the property's reviews.
///
/// The full property row is carried; its `id` is the reserved property's id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GuestReservation {
    pub reservation_id: i32,
    pub guest_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub review_id: i32,
    pub rating: Option<i16>,
    pub review_message: Option<String>,
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reservations for a guest with the default cap of 10 rows.
    pub async fn list_for_guest_default(
        &self,
        guest_id: i32,
    ) -> Result<Vec<GuestReservation>, DbError> {
        self.list_for_guest(guest_id, DEFAULT_LIMIT).await
    }

    /// Reservations for a guest, at most `limit` rows.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<GuestReservation>, DbError> {
        if limit < 1 {
            return Err(ValidationError::InvalidLimit(limit).into());
        }
        debug!(guest_id, limit, "listing reservations");

        sqlx::query_as(
            r#"
            SELECT
                r.id AS reservation_id,
                r.guest_id,
                r.start_date,
                r.end_date,
                p.*,
                pr.id AS review_id,
                pr.rating,
                pr.message AS review_message
            FROM reservations AS r
            JOIN properties AS p ON r.property_id = p.id
            JOIN property_reviews AS pr ON p.id = pr.property_id
            WHERE r.guest_id = $1
            ORDER BY r.start_date, r.id, pr.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| DbError::from_query("get_reservations_for_guest", e))
    }
}
