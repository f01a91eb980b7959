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
use crate::services::quotes::{CreateQuoteRequest, QuoteResponse, UpdateQuoteRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list).post(create))
        .route("/quotes/:id", get(get_one).put(update).delete(delete))
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<YearQuery>,
) -> Result<Json<ApiResponse<Vec<QuoteResponse>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.quotes.list(query.year).await?,
    )))
}

#[utoipa::path(
    post,
    path = "/api/sales/quotes",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote created; invoice PDF stored when rendering succeeded"),
        (status = 400, description = "Totals inconsistent or lines invalid", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.quotes.create(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.quotes.get(id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateQuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.quotes.update(id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.quotes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
