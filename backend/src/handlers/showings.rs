use actix_web::{web, HttpResponse};
use cinema_shared::constants::ERROR_INSUFFICIENT_PERMISSIONS;
use cinema_shared::dto::{CreateShowingRequest, UpdateShowingRequest};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::auth::{AuthenticatedUser, MaybeUser};
use crate::models::{Booking, Showing};
use crate::policy::{self, Action, Resource};

#[derive(Debug, Serialize)]
pub struct RemoveShowingsResponse {
    pub success: bool,
    pub showings_removed: u64,
    pub bookings_removed: u64,
    pub message: String,
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation("Price cannot be negative".to_string()));
    }
    Ok(())
}

pub async fn list_showings(
    user: MaybeUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Showing, Action::List, user.as_ref())?;

    let showings = Showing::find_all_detailed(database.pool()).await?;

    Ok(HttpResponse::Ok().json(showings))
}

pub async fn get_showing(
    user: MaybeUser,
    showing_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Showing, Action::Retrieve, user.as_ref())?;

    let showing = Showing::find_detailed(database.pool(), *showing_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Showing not found".to_string()))?;

    Ok(HttpResponse::Ok().json(showing))
}

pub async fn create_showing(
    user: MaybeUser,
    request: web::Json<CreateShowingRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Showing, Action::Create, user.as_ref())?;
    request.validate()?;
    validate_price(request.price)?;

    let showing = Showing::create(database.pool(), &request).await?;

    info!(showing_id = %showing.id, movie_id = %showing.movie_id, "showing created");

    let detailed = Showing::find_detailed(database.pool(), showing.id)
        .await?
        .ok_or_else(|| AppError::Internal("Created showing vanished".to_string()))?;

    Ok(HttpResponse::Created().json(detailed))
}

pub async fn update_showing(
    user: MaybeUser,
    showing_id: web::Path<Uuid>,
    request: web::Json<UpdateShowingRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Showing, Action::Update, user.as_ref())?;
    request.validate()?;
    if let Some(price) = request.price {
        validate_price(price)?;
    }

    let showing = Showing::update(database.pool(), *showing_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Showing not found".to_string()))?;

    let detailed = Showing::find_detailed(database.pool(), showing.id)
        .await?
        .ok_or_else(|| AppError::Internal("Updated showing vanished".to_string()))?;

    Ok(HttpResponse::Ok().json(detailed))
}

pub async fn delete_showing(
    user: MaybeUser,
    showing_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Showing, Action::Delete, user.as_ref())?;

    if !Showing::delete(database.pool(), *showing_id).await? {
        return Err(AppError::NotFound("Showing not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Showings for the current date, with the tomorrow/everything fallback
/// cascade. No auth is enforced on this endpoint.
pub async fn today_showings(database: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let showings = Showing::find_for_today(database.pool()).await?;

    debug!(count = showings.len(), "today-showings lookup");

    Ok(HttpResponse::Ok().json(showings))
}

/// Maintenance sweep: every booking, then every showing. Movies, theaters,
/// snacks, and users are untouched.
pub async fn remove_test_showings(
    caller: AuthenticatedUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    if !caller.is_staff && !caller.is_superuser {
        return Err(AppError::Authorization(
            ERROR_INSUFFICIENT_PERMISSIONS.to_string(),
        ));
    }

    let bookings_removed = Booking::delete_all(database.pool()).await?;
    let showings_removed = Showing::delete_all(database.pool()).await?;

    info!(
        admin = %caller.username,
        bookings_removed,
        showings_removed,
        "removed all showings and bookings"
    );

    Ok(HttpResponse::Ok().json(RemoveShowingsResponse {
        success: true,
        showings_removed,
        bookings_removed,
        message: format!(
            "Successfully removed {} showings and {} bookings",
            showings_removed, bookings_removed
        ),
    }))
}
