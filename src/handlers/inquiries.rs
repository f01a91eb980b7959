use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::entities::inquiry;
use crate::errors::ServiceError;
use crate::handlers::YearQuery;
use crate::services::inquiries::{CreateInquiryRequest, UpdateInquiryRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inquiries", get(list).post(create))
        .route("/inquiries/:id", get(get_one).put(update).delete(delete))
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<YearQuery>,
) -> Result<Json<ApiResponse<Vec<inquiry::Model>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.inquiries.list(query.year).await?,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateInquiryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .inquiries
        .create(user.id, &user.username, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<inquiry::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.inquiries.get(id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateInquiryRequest>,
) -> Result<Json<ApiResponse<inquiry::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.inquiries.update(id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.inquiries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
