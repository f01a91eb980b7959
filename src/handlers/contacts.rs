use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::entities::contact;
use crate::errors::ServiceError;
use crate::handlers::staff::read_upload;
use crate::services::contacts::{CompanyEntry, CreateContactRequest, UpdateContactRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list).post(create))
        .route("/contacts/:id", get(get_one).put(update).delete(delete))
        .route("/contacts/:id/license", post(upload_license))
        .route("/incoming-companies", get(incoming_companies))
        .route("/quotation-companies", get(quotation_companies))
}

pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<contact::Model>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.contacts.list().await?,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.contacts.create(user.id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<contact::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.contacts.get(id).await?,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateContactRequest>,
) -> Result<Json<ApiResponse<contact::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.contacts.update(id, request).await?,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.contacts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_license(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<contact::Model>>, ServiceError> {
    let (filename, bytes) = read_upload(multipart).await?;
    Ok(Json(ApiResponse::success(
        state
            .services
            .contacts
            .attach_license(id, &filename, &bytes)
            .await?,
    )))
}

pub async fn incoming_companies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<CompanyEntry>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.contacts.incoming_companies().await?,
    )))
}

pub async fn quotation_companies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<CompanyEntry>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.contacts.quotation_companies().await?,
    )))
}
