use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::product_kind;
use crate::services::removals::{
    CreateRemovalRequest, RemovalRequestResponse, UpdateRemovalRequest,
};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:kind/removal-requests", get(list).post(create))
        .route(
            "/:kind/removal-requests/:id",
            get(get_one).put(update).delete(delete),
        )
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<RemovalRequestResponse>>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.removals.list(kind).await?,
    )))
}

#[utoipa::path(
    post,
    path = "/api/inventory/{kind}/removal-requests",
    params(("kind" = String, Path, description = "local or imported")),
    request_body = CreateRemovalRequest,
    responses(
        (status = 201, description = "Removal request created"),
        (status = 400, description = "Validation failure (unknown product, quantity over stock)", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(request): Json<CreateRemovalRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = product_kind(&kind)?;
    let created = state
        .services
        .removals
        .create(kind, user.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<RemovalRequestResponse>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.removals.get(kind, id).await?,
    )))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{kind}/removal-requests/{id}",
    params(
        ("kind" = String, Path, description = "local or imported"),
        ("id" = i32, Path, description = "Removal request id")
    ),
    request_body = UpdateRemovalRequest,
    responses(
        (status = 200, description = "Saved; stock deducted if this save completed the approvals"),
        (status = 422, description = "Insufficient stock at deduction time", body = crate::errors::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
    Json(request): Json<UpdateRemovalRequest>,
) -> Result<Json<ApiResponse<RemovalRequestResponse>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.removals.update(kind, id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<StatusCode, ServiceError> {
    let kind = product_kind(&kind)?;
    state.services.removals.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
