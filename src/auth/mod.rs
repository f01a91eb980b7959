//! Token-based authentication against the user directory.
//!
//! Access/refresh JWT pairs signed with the configured secret; passwords
//! hashed with argon2. Protected handlers take the [`AuthUser`] extractor.

use std::sync::Arc;
use std::time::Duration;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::user::{self, Entity as UserEntity};
use crate::errors::ServiceError;

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    /// "access" or "refresh"
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    pub username: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or email address
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
    pub email: String,
}

/// Authenticated caller, extracted from the Bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

pub struct AuthService {
    db: Arc<DatabaseConnection>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl AuthService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        jwt_secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Creates a user account with a hashed password.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<user::Model, ServiceError> {
        request.validate()?;

        let existing = UserEntity::find()
            .filter(
                user::Column::Username
                    .eq(request.username.clone())
                    .or(user::Column::Email.eq(request.email.clone())),
            )
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "A user with that username or email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(request.username),
            email: Set(request.email),
            password_hash: Set(password_hash),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        };
        Ok(model.insert(&*self.db).await?)
    }

    /// Authenticates by username or email and issues a token pair.
    #[instrument(skip(self, request), fields(identifier = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<TokenPair, ServiceError> {
        let filter = if request.username.contains('@') {
            user::Column::Email.eq(request.username.clone())
        } else {
            user::Column::Username.eq(request.username.clone())
        };
        let account = UserEntity::find().filter(filter).one(&*self.db).await?;

        let account = match account {
            Some(account) if account.is_active => account,
            _ => {
                return Err(ServiceError::Unauthorized(
                    "Invalid credentials or inactive account".to_string(),
                ))
            }
        };
        if !verify_password(&request.password, &account.password_hash)? {
            return Err(ServiceError::Unauthorized(
                "Invalid credentials or inactive account".to_string(),
            ));
        }

        self.issue_pair(&account)
    }

    /// Exchanges a refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ServiceError> {
        let claims = self.decode(refresh_token)?;
        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(ServiceError::Unauthorized(
                "Refresh token required".to_string(),
            ));
        }
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Malformed token subject".to_string()))?;
        let account = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .filter(|account| account.is_active)
            .ok_or_else(|| ServiceError::Unauthorized("Unknown or inactive account".to_string()))?;
        self.issue_pair(&account)
    }

    /// Validates an access token and resolves its user.
    pub async fn verify(&self, token: &str) -> Result<user::Model, ServiceError> {
        let claims = self.decode(token)?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(ServiceError::Unauthorized("Access token required".to_string()));
        }
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Malformed token subject".to_string()))?;
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .filter(|account| account.is_active)
            .ok_or_else(|| ServiceError::Unauthorized("Unknown or inactive account".to_string()))
    }

    fn issue_pair(&self, account: &user::Model) -> Result<TokenPair, ServiceError> {
        Ok(TokenPair {
            access: self.sign(account, TOKEN_TYPE_ACCESS, self.access_ttl)?,
            refresh: self.sign(account, TOKEN_TYPE_REFRESH, self.refresh_ttl)?,
            username: account.username.clone(),
        })
    }

    fn sign(
        &self,
        account: &user::Model,
        token_type: &str,
        ttl: Duration,
    ) -> Result<String, ServiceError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            token_type: token_type.to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::InternalError(format!("token signing failed: {e}")))
    }

    fn decode(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {e}")))
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::InternalError(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ServiceError::InternalError(format!("stored hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Pulls the Bearer token from the Authorization header.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AuthService>: axum::extract::FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = <Arc<AuthService> as axum::extract::FromRef<S>>::from_ref(state);
        let token = bearer_token(parts)
            .ok_or_else(|| ServiceError::Unauthorized("Missing Bearer token".to_string()))?;
        let account = auth.verify(token).await?;
        Ok(AuthUser {
            id: account.id,
            username: account.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }
}
