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
use crate::services::stock::{
    CreateStockHistoryRequest, StockHistoryResponse, UpdateStockHistoryRequest,
};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:kind/stock-history", get(list).post(create))
        .route(
            "/:kind/stock-history/:id",
            get(get_one).put(update).delete(delete),
        )
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<StockHistoryResponse>>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.stock.list(kind).await?,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(request): Json<CreateStockHistoryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = product_kind(&kind)?;
    let created = state
        .services
        .stock
        .create(kind, user.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<StockHistoryResponse>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.stock.get(kind, id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
    Json(request): Json<UpdateStockHistoryRequest>,
) -> Result<Json<ApiResponse<StockHistoryResponse>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.stock.update(kind, id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<StatusCode, ServiceError> {
    let kind = product_kind(&kind)?;
    state.services.stock.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
