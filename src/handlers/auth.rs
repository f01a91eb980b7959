use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{AuthUser, LoginRequest, RegisterRequest, TokenPair, VerifyResponse};
use crate::entities::user::{self, Entity as UserEntity};
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Row shape for the user directory listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEntry {
    pub id: uuid::Uuid,
    pub username: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
        .route("/token/refresh", post(refresh))
        .route("/token/verify", post(verify))
}

#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPair),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPair>, ServiceError> {
    Ok(Json(state.services.auth.login(request).await?))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ServiceError> {
    Ok(Json(state.services.auth.refresh(&request.refresh).await?))
}

/// Verifies the Bearer token from the Authorization header and reports
/// the account it belongs to.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ServiceError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| ServiceError::ValidationError("No token provided".to_string()))?;

    let account = state.services.auth.verify(token).await?;
    Ok(Json(VerifyResponse {
        valid: true,
        username: account.username,
        email: account.email,
    }))
}

/// Minimal user directory for assignment dropdowns.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<UserEntry>>, ServiceError> {
    let users = UserEntity::find().all(&*state.db).await?;
    Ok(Json(
        users
            .into_iter()
            .map(|account: user::Model| UserEntry {
                id: account.id,
                username: account.username,
            })
            .collect(),
    ))
}
