use actix_web::{web, HttpResponse};
use cinema_shared::constants::ERROR_SHOWING_NOT_FOUND;
use cinema_shared::dto::{BookShowingRequest, BookingResponse};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Booking, Showing};
use crate::policy::{self, Action, Resource};

#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub booking_id: Uuid,
    pub booking: BookingResponse,
}

/// Reserve a seat count against a showing. No availability check is made,
/// so concurrent callers can jointly exceed the theater capacity.
pub async fn book_showing(
    caller: AuthenticatedUser,
    request: web::Json<BookShowingRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Booking, Action::Create, Some(&caller))?;
    request.validate()?;

    let showing = Showing::find_by_id(database.pool(), request.showing_id)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_SHOWING_NOT_FOUND.to_string()))?;

    let booking =
        Booking::create(database.pool(), caller.user_id, showing.id, request.seats).await?;

    info!(
        booking_id = %booking.id,
        username = %caller.username,
        seats = booking.seats,
        "booking created"
    );

    let detailed = Booking::find_detailed(database.pool(), booking.id)
        .await?
        .ok_or_else(|| AppError::Internal("Created booking vanished".to_string()))?;

    Ok(HttpResponse::Ok().json(BookingCreatedResponse {
        success: true,
        booking_id: booking.id,
        booking: detailed,
    }))
}

/// The caller's bookings, newest first.
pub async fn user_bookings(
    caller: AuthenticatedUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Booking, Action::List, Some(&caller))?;

    let bookings = Booking::find_by_user_detailed(database.pool(), caller.user_id).await?;

    Ok(HttpResponse::Ok().json(bookings))
}
