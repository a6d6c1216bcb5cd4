use crate::constants::UNKNOWN_FIELD;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// User DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[serde(default)]
    pub is_staff_member: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff_member: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

/// Body returned by login and signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub is_staff_member: bool,
    pub username: String,
    pub token: String,
}

// Movie DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: String,

    /// Duration in minutes.
    pub duration: i32,

    #[validate(url)]
    pub poster_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub duration: Option<i32>,

    #[validate(url)]
    pub poster_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub poster_url: Option<String>,
}

// Theater DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTheaterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub capacity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTheaterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub capacity: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TheaterResponse {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
}

// Showing DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateShowingRequest {
    pub movie: Uuid,
    pub theater: Uuid,
    pub start_time: DateTime<Utc>,
    pub price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateShowingRequest {
    pub movie: Option<Uuid>,
    pub theater: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowingResponse {
    pub id: Uuid,
    pub movie: Uuid,
    pub theater: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub price: Decimal,
    pub movie_title: String,
    pub theater_name: String,
}

// Booking DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BookShowingRequest {
    pub showing_id: Uuid,

    #[validate(range(min = 1))]
    pub seats: i32,
}

/// Denormalized showing fields attached to a booking. Timestamps are
/// preformatted display strings and the price is an f64 on this path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowingDetails {
    pub movie_title: String,
    pub theater_name: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub price: f64,
}

impl ShowingDetails {
    /// Placeholder returned when the showing chain cannot be resolved.
    pub fn unknown() -> Self {
        Self {
            movie_title: UNKNOWN_FIELD.to_string(),
            theater_name: UNKNOWN_FIELD.to_string(),
            start_time: UNKNOWN_FIELD.to_string(),
            end_time: Some(UNKNOWN_FIELD.to_string()),
            price: 0.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub seats: i32,
    pub showing: Uuid,
    pub showing_details: ShowingDetails,
    pub created_at: DateTime<Utc>,
}

// Snack DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateSnackItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: Decimal,

    pub quantity_available: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateSnackItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub price: Option<Decimal>,

    pub quantity_available: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnackItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity_available: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_details_placeholder_uses_unknown_strings_and_zero_price() {
        let details = ShowingDetails::unknown();
        assert_eq!(details.movie_title, "Unknown");
        assert_eq!(details.theater_name, "Unknown");
        assert_eq!(details.start_time, "Unknown");
        assert_eq!(details.end_time.as_deref(), Some("Unknown"));
        assert_eq!(details.price, 0.0);
    }

    #[test]
    fn showing_price_serializes_fixed_point_and_detail_price_as_float() {
        let response = ShowingResponse {
            id: Uuid::nil(),
            movie: Uuid::nil(),
            theater: Uuid::nil(),
            start_time: Utc::now(),
            end_time: None,
            price: Decimal::new(1250, 2),
            movie_title: "X".to_string(),
            theater_name: "T".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["price"], serde_json::json!("12.50"));

        let details = ShowingDetails {
            movie_title: "X".to_string(),
            theater_name: "T".to_string(),
            start_time: "2024-01-01 10:00".to_string(),
            end_time: Some("2024-01-01 11:40".to_string()),
            price: 12.5,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.5));
    }

    #[test]
    fn create_user_request_defaults_staff_flag_off() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"username": "customer", "email": "customer@example.com", "password": "password123"}"#,
        )
        .unwrap();
        assert!(!request.is_staff_member);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn book_request_rejects_zero_seats() {
        let request = BookShowingRequest {
            showing_id: Uuid::nil(),
            seats: 0,
        };
        assert!(request.validate().is_err());
    }
}
