use actix_web::{web, HttpResponse};
use cinema_shared::dto::{CreateTheaterRequest, TheaterResponse, UpdateTheaterRequest};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::auth::MaybeUser;
use crate::models::Theater;
use crate::policy::{self, Action, Resource};

pub async fn list_theaters(
    user: MaybeUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Theater, Action::List, user.as_ref())?;

    let theaters = Theater::find_all(database.pool()).await?;
    let response: Vec<TheaterResponse> = theaters.iter().map(Theater::to_response).collect();

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_theater(
    user: MaybeUser,
    theater_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Theater, Action::Retrieve, user.as_ref())?;

    let theater = Theater::find_by_id(database.pool(), *theater_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Theater not found".to_string()))?;

    Ok(HttpResponse::Ok().json(theater.to_response()))
}

pub async fn create_theater(
    user: MaybeUser,
    request: web::Json<CreateTheaterRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Theater, Action::Create, user.as_ref())?;
    request.validate()?;

    let theater = Theater::create(database.pool(), &request).await?;

    info!(theater_id = %theater.id, name = %theater.name, "theater created");

    Ok(HttpResponse::Created().json(theater.to_response()))
}

pub async fn update_theater(
    user: MaybeUser,
    theater_id: web::Path<Uuid>,
    request: web::Json<UpdateTheaterRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Theater, Action::Update, user.as_ref())?;
    request.validate()?;

    let theater = Theater::update(database.pool(), *theater_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Theater not found".to_string()))?;

    Ok(HttpResponse::Ok().json(theater.to_response()))
}

pub async fn delete_theater(
    user: MaybeUser,
    theater_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Theater, Action::Delete, user.as_ref())?;

    if !Theater::delete(database.pool(), *theater_id).await? {
        return Err(AppError::NotFound("Theater not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
