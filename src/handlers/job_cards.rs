use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::entities::job_card;
use crate::errors::ServiceError;
use crate::services::job_cards::{CreateJobCardRequest, UpdateJobCardRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/job-cards", get(list).post(create))
        .route("/job-cards/:id", get(get_one).put(update).delete(delete))
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<job_card::Model>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.job_cards.list().await?,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateJobCardRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.job_cards.create(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<job_card::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.job_cards.get(id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateJobCardRequest>,
) -> Result<Json<ApiResponse<job_card::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.job_cards.update(id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.job_cards.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
