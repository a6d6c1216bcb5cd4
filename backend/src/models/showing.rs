use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use cinema_shared::constants::{UNKNOWN_MOVIE, UNKNOWN_THEATER};
use cinema_shared::dto::{CreateShowingRequest, ShowingResponse, UpdateShowingRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Movie, Theater};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Showing {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub theater_id: Uuid,
    pub start_time: DateTime<Utc>,
    /// Derived from the movie duration when the write carries both the
    /// movie and the start time; otherwise left as stored, which can go
    /// stale on partial updates.
    pub end_time: Option<DateTime<Utc>>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A showing runs for exactly the movie's duration.
pub fn compute_end_time(start_time: DateTime<Utc>, duration_minutes: i32) -> DateTime<Utc> {
    start_time + Duration::minutes(duration_minutes as i64)
}

/// Three-tier fallback over server-local calendar dates: today's showings,
/// else tomorrow's, else everything, else nothing. Order is whatever the
/// store handed back.
pub(crate) fn select_for_date(all: Vec<ShowingResponse>, today: NaiveDate) -> Vec<ShowingResponse> {
    let falls_on =
        |s: &ShowingResponse, date: NaiveDate| s.start_time.with_timezone(&Local).date_naive() == date;

    let todays: Vec<ShowingResponse> = all.iter().filter(|s| falls_on(s, today)).cloned().collect();
    if !todays.is_empty() {
        return todays;
    }

    let tomorrow = today + Duration::days(1);
    let tomorrows: Vec<ShowingResponse> =
        all.iter().filter(|s| falls_on(s, tomorrow)).cloned().collect();
    if !tomorrows.is_empty() {
        return tomorrows;
    }

    all
}

/// Flat row for the showing + display-name join.
#[derive(Debug, FromRow)]
struct ShowingDetailRow {
    id: Uuid,
    movie_id: Uuid,
    theater_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    price: Decimal,
    movie_title: Option<String>,
    theater_name: Option<String>,
}

impl ShowingDetailRow {
    fn into_response(self) -> ShowingResponse {
        ShowingResponse {
            id: self.id,
            movie: self.movie_id,
            theater: self.theater_id,
            start_time: self.start_time,
            end_time: self.end_time,
            price: self.price,
            movie_title: self.movie_title.unwrap_or_else(|| UNKNOWN_MOVIE.to_string()),
            theater_name: self
                .theater_name
                .unwrap_or_else(|| UNKNOWN_THEATER.to_string()),
        }
    }
}

const DETAIL_SELECT: &str = r#"
    SELECT s.id, s.movie_id, s.theater_id, s.start_time, s.end_time, s.price,
           m.title AS movie_title, t.name AS theater_name
    FROM showings s
    LEFT JOIN movies m ON s.movie_id = m.id
    LEFT JOIN theaters t ON s.theater_id = t.id
"#;

impl Showing {
    /// Create a new showing. `end_time` is always derived on create since
    /// both the movie and the start time are present.
    pub async fn create(pool: &PgPool, request: &CreateShowingRequest) -> Result<Self, AppError> {
        let movie = Movie::find_by_id(pool, request.movie)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Movie {} does not exist", request.movie))
            })?;

        if Theater::find_by_id(pool, request.theater).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Theater {} does not exist",
                request.theater
            )));
        }

        let end_time = compute_end_time(request.start_time, movie.duration);

        let showing = sqlx::query_as::<_, Showing>(
            r#"
            INSERT INTO showings (movie_id, theater_id, start_time, end_time, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, movie_id, theater_id, start_time, end_time, price,
                      created_at, updated_at
            "#,
        )
        .bind(request.movie)
        .bind(request.theater)
        .bind(request.start_time)
        .bind(end_time)
        .bind(request.price)
        .fetch_one(pool)
        .await?;

        Ok(showing)
    }

    /// Find showing by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let showing = sqlx::query_as::<_, Showing>(
            r#"
            SELECT id, movie_id, theater_id, start_time, end_time, price, created_at, updated_at
            FROM showings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(showing)
    }

    /// Partial update. `end_time` refreshes only when the movie and the
    /// start time travel in the same write; a start_time-only or
    /// movie-only update leaves the stored end_time untouched.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        request: &UpdateShowingRequest,
    ) -> Result<Option<Self>, AppError> {
        let movie = match request.movie {
            Some(movie_id) => Some(Movie::find_by_id(pool, movie_id).await?.ok_or_else(
                || AppError::Validation(format!("Movie {} does not exist", movie_id)),
            )?),
            None => None,
        };

        if let Some(theater_id) = request.theater {
            if Theater::find_by_id(pool, theater_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Theater {} does not exist",
                    theater_id
                )));
            }
        }

        let end_time = match (&movie, request.start_time) {
            (Some(movie), Some(start_time)) => Some(compute_end_time(start_time, movie.duration)),
            _ => None,
        };

        let showing = sqlx::query_as::<_, Showing>(
            r#"
            UPDATE showings
            SET movie_id = COALESCE($1, movie_id),
                theater_id = COALESCE($2, theater_id),
                start_time = COALESCE($3, start_time),
                price = COALESCE($4, price),
                end_time = COALESCE($5, end_time),
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, movie_id, theater_id, start_time, end_time, price,
                      created_at, updated_at
            "#,
        )
        .bind(request.movie)
        .bind(request.theater)
        .bind(request.start_time)
        .bind(request.price)
        .bind(end_time)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(showing)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM showings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every showing, returning the count. Callers are expected to
    /// clear bookings first.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM showings").execute(pool).await?;

        Ok(result.rows_affected())
    }

    /// All showings decorated with display names. No explicit ordering.
    pub async fn find_all_detailed(pool: &PgPool) -> Result<Vec<ShowingResponse>, AppError> {
        let rows = sqlx::query_as::<_, ShowingDetailRow>(DETAIL_SELECT)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(ShowingDetailRow::into_response).collect())
    }

    /// One showing decorated with display names.
    pub async fn find_detailed(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<ShowingResponse>, AppError> {
        let query = format!("{} WHERE s.id = $1", DETAIL_SELECT);
        let row = sqlx::query_as::<_, ShowingDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(ShowingDetailRow::into_response))
    }

    /// Showings relevant to the current date, per the fallback cascade in
    /// `select_for_date`.
    pub async fn find_for_today(pool: &PgPool) -> Result<Vec<ShowingResponse>, AppError> {
        let all = Self::find_all_detailed(pool).await?;
        Ok(select_for_date(all, Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn end_time_adds_the_movie_duration() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let end = compute_end_time(start, 100);
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 1, 11, 40, 0).unwrap());
    }

    #[test]
    fn zero_duration_keeps_start_and_end_equal() {
        let start = Utc.with_ymd_and_hms(2024, 6, 15, 22, 0, 0).unwrap();
        assert_eq!(compute_end_time(start, 0), start);
    }

    fn showing_on(date: NaiveDate, hour: u32) -> ShowingResponse {
        let start = Local
            .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc);

        ShowingResponse {
            id: Uuid::new_v4(),
            movie: Uuid::new_v4(),
            theater: Uuid::new_v4(),
            start_time: start,
            end_time: None,
            price: Decimal::new(1000, 2),
            movie_title: "X".to_string(),
            theater_name: "T".to_string(),
        }
    }

    #[test]
    fn cascade_prefers_todays_showings() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let tomorrow = today + Duration::days(1);

        let todays = showing_on(today, 19);
        let all = vec![showing_on(tomorrow, 10), todays.clone(), showing_on(tomorrow, 16)];

        let selected = select_for_date(all, today);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, todays.id);
    }

    #[test]
    fn cascade_falls_back_to_exactly_the_tomorrow_set() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let tomorrow = today + Duration::days(1);
        let next_week = today + Duration::days(7);

        let all = vec![
            showing_on(tomorrow, 10),
            showing_on(next_week, 19),
            showing_on(tomorrow, 22),
        ];

        let selected = select_for_date(all.clone(), today);
        assert_eq!(selected.len(), 2);
        assert!(selected
            .iter()
            .all(|s| s.start_time.with_timezone(&Local).date_naive() == tomorrow));
    }

    #[test]
    fn cascade_returns_everything_when_neither_day_matches() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let next_week = today + Duration::days(7);

        let all = vec![showing_on(next_week, 10), showing_on(next_week, 19)];

        let selected = select_for_date(all.clone(), today);
        assert_eq!(selected.len(), all.len());
    }

    #[test]
    fn cascade_yields_nothing_for_an_empty_store() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(select_for_date(Vec::new(), today).is_empty());
    }

    #[test]
    fn missing_display_names_fall_back_to_unknown_strings() {
        let row = ShowingDetailRow {
            id: Uuid::new_v4(),
            movie_id: Uuid::new_v4(),
            theater_id: Uuid::new_v4(),
            start_time: Utc::now(),
            end_time: None,
            price: Decimal::new(999, 2),
            movie_title: None,
            theater_name: None,
        };

        let response = row.into_response();
        assert_eq!(response.movie_title, "Unknown Movie");
        assert_eq!(response.theater_name, "Unknown Theater");
    }
}
