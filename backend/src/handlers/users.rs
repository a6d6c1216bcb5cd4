use actix_web::{web, HttpResponse};
use cinema_shared::constants::{ERROR_INVALID_CREDENTIALS, ERROR_USERNAME_ALREADY_EXISTS};
use cinema_shared::dto::{AuthResponse, CreateUserRequest, LoginRequest, UserResponse};
use tracing::{debug, info};
use validator::Validate;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::User;
use crate::policy::{self, Action, Resource};
use crate::utils::jwt::JwtService;

/// Authenticate by username and password, issuing an access token.
pub async fn login(
    request: web::Json<LoginRequest>,
    database: web::Data<Database>,
    jwt_service: web::Data<JwtService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let user = User::find_by_username(database.pool(), &request.username)
        .await?
        .ok_or_else(|| AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()))?;

    if !bcrypt::verify(&request.password, &user.password_hash)? {
        return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()));
    }

    let token = jwt_service.generate_token(&user)?;

    debug!(username = %user.username, "issued access token");

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        is_staff_member: user.is_staff_member,
        username: user.username,
        token,
    }))
}

/// Self-service registration. The native staff flag mirrors the requested
/// cinema staff flag here, unlike admin-driven creation.
pub async fn signup(
    request: web::Json<CreateUserRequest>,
    database: web::Data<Database>,
    jwt_service: web::Data<JwtService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    if User::username_exists(database.pool(), &request.username).await? {
        return Err(AppError::Validation(ERROR_USERNAME_ALREADY_EXISTS.to_string()));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
    let user = User::create(
        database.pool(),
        &request,
        password_hash,
        request.is_staff_member,
    )
    .await?;

    let token = jwt_service.generate_token(&user)?;

    info!(username = %user.username, "user signed up");

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        is_staff_member: user.is_staff_member,
        username: user.username,
        token,
    }))
}

/// Create a new user (staff only).
pub async fn create_user(
    caller: AuthenticatedUser,
    request: web::Json<CreateUserRequest>,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::User, Action::Create, Some(&caller))?;
    request.validate()?;

    if User::username_exists(database.pool(), &request.username).await? {
        return Err(AppError::Validation(ERROR_USERNAME_ALREADY_EXISTS.to_string()));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
    let user = User::create(database.pool(), &request, password_hash, false).await?;

    info!(username = %user.username, created_by = %caller.username, "user created");

    Ok(HttpResponse::Created().json(user.to_response()))
}

/// List all users (staff only).
pub async fn list_users(
    caller: AuthenticatedUser,
    database: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    policy::authorize(Resource::User, Action::List, Some(&caller))?;

    let users = User::find_all(database.pool()).await?;
    let response: Vec<UserResponse> = users.iter().map(User::to_response).collect();

    Ok(HttpResponse::Ok().json(response))
}
