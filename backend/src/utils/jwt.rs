use chrono::{Duration, Utc};
use cinema_shared::constants::{JWT_ACCESS_TOKEN_EXPIRY, JWT_MIN_SECRET_LENGTH};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub username: String,
    pub is_staff_member: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Build the service from an injected secret. The secret comes from
    /// `AppConfig` rather than being read here.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.len() < JWT_MIN_SECRET_LENGTH {
            return Err(AppError::Internal(format!(
                "JWT_SECRET must be at least {} characters long",
                JWT_MIN_SECRET_LENGTH
            )));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);
        validation.validate_exp = true;
        validation.leeway = 30; // seconds of clock-skew tolerance

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Generate an access token carrying the user's identity and both
    /// staff flags.
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now
            + Duration::from_std(JWT_ACCESS_TOKEN_EXPIRY)
                .map_err(|_| AppError::Internal("Invalid token expiry duration".to_string()))?;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            is_staff_member: user.is_staff_member,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Authentication("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::Authentication("Invalid token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Authentication("Invalid token signature".to_string())
                }
                _ => AppError::Authentication("Token validation failed".to_string()),
            })?;

        Ok(token_data.claims)
    }
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Internal("Invalid user ID in claims".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "staff".to_string(),
            email: "staff@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_staff_member: true,
            is_staff: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service() -> JwtService {
        JwtService::new("an-extremely-well-kept-test-secret-value").unwrap()
    }

    #[test]
    fn rejects_short_secrets() {
        assert!(JwtService::new("short").is_err());
    }

    #[test]
    fn token_round_trips_identity_and_staff_flags() {
        let service = service();
        let user = test_user();

        let token = service.generate_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "staff");
        assert!(claims.is_staff_member);
        assert!(claims.is_staff);
        assert!(!claims.is_superuser);
    }

    #[test]
    fn tampered_tokens_fail_validation() {
        let service = service();
        let other = JwtService::new("a-completely-different-signing-secret!!").unwrap();

        let token = other.generate_token(&test_user()).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Authentication(_))
        ));
    }
}
