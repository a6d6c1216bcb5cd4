use actix_web::{web, HttpResponse};
use cinema_shared::dto::{CreateMovieRequest, MovieResponse, UpdateMovieRequest};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::auth::MaybeUser;
use crate::models::Movie;
use crate::policy::{self, Action, Resource};

pub async fn list_movies(
    user: MaybeUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Movie, Action::List, user.as_ref())?;

    let movies = Movie::find_all(database.pool()).await?;
    let response: Vec<MovieResponse> = movies.iter().map(Movie::to_response).collect();

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_movie(
    user: MaybeUser,
    movie_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Movie, Action::Retrieve, user.as_ref())?;

    let movie = Movie::find_by_id(database.pool(), *movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(HttpResponse::Ok().json(movie.to_response()))
}

pub async fn create_movie(
    user: MaybeUser,
    request: web::Json<CreateMovieRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Movie, Action::Create, user.as_ref())?;
    request.validate()?;

    let movie = Movie::create(database.pool(), &request).await?;

    info!(movie_id = %movie.id, title = %movie.title, "movie created");

    Ok(HttpResponse::Created().json(movie.to_response()))
}

pub async fn update_movie(
    user: MaybeUser,
    movie_id: web::Path<Uuid>,
    request: web::Json<UpdateMovieRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Movie, Action::Update, user.as_ref())?;
    request.validate()?;

    let movie = Movie::update(database.pool(), *movie_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(HttpResponse::Ok().json(movie.to_response()))
}

pub async fn delete_movie(
    user: MaybeUser,
    movie_id: web::Path<Uuid>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::Movie, Action::Delete, user.as_ref())?;

    if !Movie::delete(database.pool(), *movie_id).await? {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
