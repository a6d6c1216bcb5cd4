use actix_web::{web, HttpResponse};
use cinema_shared::dto::{CreateSnackItemRequest, SnackItemResponse, UpdateSnackItemRequest};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::auth::MaybeUser;
use crate::models::SnackItem;
use crate::policy::{self, Action, Resource};

pub async fn list_snacks(
    user: MaybeUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::SnackItem, Action::List, user.as_ref())?;

    let snacks = SnackItem::find_all(database.pool()).await?;
    let response: Vec<SnackItemResponse> = snacks.iter().map(SnackItem::to_response).collect();

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_snack(
    user: MaybeUser,
    snack_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::SnackItem, Action::Retrieve, user.as_ref())?;

    let snack = SnackItem::find_by_id(database.pool(), *snack_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Snack item not found".to_string()))?;

    Ok(HttpResponse::Ok().json(snack.to_response()))
}

pub async fn create_snack(
    user: MaybeUser,
    request: web::Json<CreateSnackItemRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::SnackItem, Action::Create, user.as_ref())?;
    request.validate()?;

    let snack = SnackItem::create(database.pool(), &request).await?;

    info!(snack_id = %snack.id, name = %snack.name, "snack item created");

    Ok(HttpResponse::Created().json(snack.to_response()))
}

pub async fn update_snack(
    user: MaybeUser,
    snack_id: web::Path<Uuid>,
    request: web::Json<UpdateSnackItemRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::SnackItem, Action::Update, user.as_ref())?;
    request.validate()?;

    let snack = SnackItem::update(database.pool(), *snack_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Snack item not found".to_string()))?;

    Ok(HttpResponse::Ok().json(snack.to_response()))
}

pub async fn delete_snack(
    user: MaybeUser,
    snack_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::SnackItem, Action::Delete, user.as_ref())?;

    if !SnackItem::delete(database.pool(), *snack_id).await? {
        return Err(AppError::NotFound("Snack item not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
