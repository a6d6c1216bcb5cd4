use chrono::{DateTime, Utc};
use cinema_shared::constants::DETAIL_TIME_FORMAT;
use cinema_shared::dto::{BookingResponse, ShowingDetails};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub showing_id: Uuid,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}

/// Flat row for the booking + showing + display-name join.
#[derive(Debug, FromRow)]
struct BookingDetailRow {
    id: Uuid,
    seats: i32,
    showing_id: Uuid,
    created_at: DateTime<Utc>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    price: Option<Decimal>,
    movie_title: Option<String>,
    theater_name: Option<String>,
}

impl BookingDetailRow {
    fn into_response(self) -> BookingResponse {
        BookingResponse {
            id: self.id,
            seats: self.seats,
            showing: self.showing_id,
            showing_details: showing_details(
                self.start_time,
                self.end_time,
                self.price,
                self.movie_title,
                self.theater_name,
            ),
            created_at: self.created_at,
        }
    }
}

/// Builds the denormalized detail block. Any unresolved link collapses the
/// whole block to the fixed placeholder record; the price narrows to f64 on
/// this path.
fn showing_details(
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    price: Option<Decimal>,
    movie_title: Option<String>,
    theater_name: Option<String>,
) -> ShowingDetails {
    match (start_time, price, movie_title, theater_name) {
        (Some(start_time), Some(price), Some(movie_title), Some(theater_name)) => ShowingDetails {
            movie_title,
            theater_name,
            start_time: start_time.format(DETAIL_TIME_FORMAT).to_string(),
            end_time: end_time.map(|t| t.format(DETAIL_TIME_FORMAT).to_string()),
            price: price.to_f64().unwrap_or(0.0),
        },
        _ => ShowingDetails::unknown(),
    }
}

const DETAIL_SELECT: &str = r#"
    SELECT b.id, b.seats, b.showing_id, b.created_at,
           s.start_time, s.end_time, s.price,
           m.title AS movie_title, t.name AS theater_name
    FROM bookings b
    LEFT JOIN showings s ON b.showing_id = s.id
    LEFT JOIN movies m ON s.movie_id = m.id
    LEFT JOIN theaters t ON s.theater_id = t.id
"#;

impl Booking {
    /// Create a booking for a caller against an existing showing. No seat
    /// availability check is made.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        showing_id: Uuid,
        seats: i32,
    ) -> Result<Self, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, showing_id, seats)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, showing_id, seats, created_at
            "#,
        )
        .bind(user_id)
        .bind(showing_id)
        .bind(seats)
        .fetch_one(pool)
        .await?;

        Ok(booking)
    }

    /// One booking decorated with showing details.
    pub async fn find_detailed(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<BookingResponse>, AppError> {
        let query = format!("{} WHERE b.id = $1", DETAIL_SELECT);
        let row = sqlx::query_as::<_, BookingDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(BookingDetailRow::into_response))
    }

    /// A caller's bookings, newest first, decorated with showing details.
    pub async fn find_by_user_detailed(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<BookingResponse>, AppError> {
        let query = format!(
            "{} WHERE b.user_id = $1 ORDER BY b.created_at DESC",
            DETAIL_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetailRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(BookingDetailRow::into_response).collect())
    }

    /// Delete every booking, returning the count. Runs before the showing
    /// sweep to respect the foreign-key dependency.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM bookings").execute(pool).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn details_format_timestamps_and_narrow_price_to_float() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 11, 40, 0).unwrap();

        let details = showing_details(
            Some(start),
            Some(end),
            Some(Decimal::new(1250, 2)),
            Some("X".to_string()),
            Some("Grand Theater".to_string()),
        );

        assert_eq!(details.movie_title, "X");
        assert_eq!(details.theater_name, "Grand Theater");
        assert_eq!(details.start_time, "2024-01-01 10:00");
        assert_eq!(details.end_time.as_deref(), Some("2024-01-01 11:40"));
        assert_eq!(details.price, 12.5);
    }

    #[test]
    fn a_missing_end_time_stays_absent_without_collapsing_the_block() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        let details = showing_details(
            Some(start),
            None,
            Some(Decimal::new(800, 2)),
            Some("X".to_string()),
            Some("T".to_string()),
        );

        assert_eq!(details.end_time, None);
        assert_eq!(details.movie_title, "X");
    }

    #[test]
    fn any_broken_link_collapses_to_the_placeholder() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        let details = showing_details(
            Some(start),
            None,
            Some(Decimal::new(800, 2)),
            None,
            Some("T".to_string()),
        );

        assert_eq!(details, ShowingDetails::unknown());
    }
}
