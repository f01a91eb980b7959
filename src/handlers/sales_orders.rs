use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::YearQuery;
use crate::services::sales_orders::{
    CreateSalesOrderRequest, SalesOrderResponse, UpdateSalesOrderRequest,
};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales-orders", get(list).post(create))
        .route(
            "/sales-orders/:id",
            get(get_one).put(update).delete(delete),
        )
        .route("/order-companies", get(order_companies))
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<YearQuery>,
) -> Result<Json<ApiResponse<Vec<SalesOrderResponse>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.sales_orders.list(query.year).await?,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateSalesOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.sales_orders.create(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SalesOrderResponse>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.sales_orders.get(id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateSalesOrderRequest>,
) -> Result<Json<ApiResponse<SalesOrderResponse>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.sales_orders.update(id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.sales_orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn order_companies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<String>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.sales_orders.order_companies().await?,
    )))
}
