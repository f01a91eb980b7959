use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::entities::outgoing_mail;
use crate::errors::ServiceError;
use crate::handlers::YearQuery;
use crate::services::outgoing_mail::{CreateOutgoingMailRequest, UpdateOutgoingMailRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/outgoing-mails", get(list).post(create))
        .route(
            "/outgoing-mails/:id",
            get(get_one).put(update).delete(delete),
        )
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<YearQuery>,
) -> Result<Json<ApiResponse<Vec<outgoing_mail::Model>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.outgoing_mail.list(query.year).await?,
    )))
}

#[utoipa::path(
    post,
    path = "/api/sales/outgoing-mails",
    request_body = CreateOutgoingMailRequest,
    responses(
        (status = 201, description = "Mail recorded and dispatched"),
        (status = 400, description = "Missing fields or no recipient addresses", body = crate::errors::ErrorResponse),
        (status = 502, description = "Transport failure; recorded on the mail's status", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateOutgoingMailRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .outgoing_mail
        .create_and_send(user.id, &user.username, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<outgoing_mail::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.outgoing_mail.get(id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateOutgoingMailRequest>,
) -> Result<Json<ApiResponse<outgoing_mail::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.outgoing_mail.update(id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.outgoing_mail.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
