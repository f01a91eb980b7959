use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::{staff_kind, CommentBody, StaffIdQuery};
use crate::services::fines::{CreateFineRequest, FineResponse, UpdateFineRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:kind/fines", get(list).post(create))
        .route("/:kind/fines/:id", get(get_one).put(update).delete(delete))
        .route("/:kind/fines/:id/comments", post(add_comment))
        .route(
            "/:kind/fines/:id/comments/:comment_id",
            axum::routing::delete(delete_comment),
        )
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
    Query(query): Query<StaffIdQuery>,
) -> Result<Json<ApiResponse<Vec<FineResponse>>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.fines.list(kind, query.staff_id).await?,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(request): Json<CreateFineRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = staff_kind(&kind)?;
    let created = state
        .services
        .fines
        .create(kind, &user.username, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<FineResponse>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.fines.get(kind, id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
    Json(request): Json<UpdateFineRequest>,
) -> Result<Json<ApiResponse<FineResponse>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.fines.update(kind, id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<StatusCode, ServiceError> {
    let kind = staff_kind(&kind)?;
    state.services.fines.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
    Json(body): Json<CommentBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = staff_kind(&kind)?;
    let created = state
        .services
        .fines
        .add_comment(kind, id, &user.username, body.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id, comment_id)): Path<(String, i32, i32)>,
) -> Result<StatusCode, ServiceError> {
    let kind = staff_kind(&kind)?;
    state
        .services
        .fines
        .delete_comment(kind, id, comment_id, &user.username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
