use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use cinema_shared::constants::ERROR_AUTHENTICATION_REQUIRED;
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};

/// Caller identity extracted from a validated bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub is_staff_member: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        Ok(Self {
            user_id: claims.user_id()?,
            username: claims.username.clone(),
            is_staff_member: claims.is_staff_member,
            is_staff: claims.is_staff,
            is_superuser: claims.is_superuser,
        })
    }
}

/// Optional caller identity for endpoints whose policy admits anonymous
/// access. A missing header yields `None`; a present but invalid token is
/// still rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl MaybeUser {
    pub fn as_ref(&self) -> Option<&AuthenticatedUser> {
        self.0.as_ref()
    }
}

fn authenticate(req: &HttpRequest) -> Result<Option<AuthenticatedUser>, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match header {
        Some(token) => token,
        None => return Ok(None),
    };

    let jwt_service = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| AppError::Internal("JwtService not registered".to_string()))?;

    let claims = jwt_service.validate_token(token)?;
    AuthenticatedUser::from_claims(&claims).map(Some)
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|user| {
            user.ok_or_else(|| {
                AppError::Authentication(ERROR_AUTHENTICATION_REQUIRED.to_string())
            })
        }))
    }
}

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(MaybeUser))
    }
}
