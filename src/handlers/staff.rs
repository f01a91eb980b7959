use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::entities::staff;
use crate::errors::ServiceError;
use crate::handlers::staff_kind;
use crate::services::staff::{CreateStaffRequest, UpdateStaffRequest, UpdateVisaDetailsRequest};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:kind/staffdetails", get(list_staff).post(create_staff))
        .route(
            "/:kind/staffdetails/:staff_id",
            get(get_staff).put(update_staff).delete(delete_staff),
        )
        .route("/:kind/staffdetails/:staff_id/photo", post(upload_photo))
        .route(
            "/:kind/staffdetails/:staff_id/offer-letter",
            post(upload_offer_letter),
        )
        .route("/:kind/visa-details", get(list_visa_details))
        .route(
            "/:kind/visa-details/:staff_id",
            get(get_visa_details).put(update_visa_details),
        )
}

#[utoipa::path(
    get,
    path = "/api/hr/{kind}/staffdetails",
    params(("kind" = String, Path, description = "staff or manpower")),
    responses(
        (status = 200, description = "Staff list for the kind"),
        (status = 404, description = "Unknown staff kind", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<staff::Model>>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.staff.list(kind).await?,
    )))
}

#[utoipa::path(
    post,
    path = "/api/hr/{kind}/staffdetails",
    params(("kind" = String, Path, description = "staff or manpower")),
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff record created"),
        (status = 400, description = "Validation failure", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
    Json(request): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = staff_kind(&kind)?;
    let created = state.services.staff.create(kind, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<staff::Model>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.staff.get(kind, &staff_id).await?,
    )))
}

pub async fn update_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
    Json(request): Json<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<staff::Model>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.staff.update(kind, &staff_id, request).await?,
    )))
}

pub async fn delete_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
) -> Result<StatusCode, ServiceError> {
    let kind = staff_kind(&kind)?;
    state.services.staff.delete(kind, &staff_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_visa_details(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<staff::Model>>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.staff.list(kind).await?,
    )))
}

pub async fn get_visa_details(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<staff::Model>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.staff.get(kind, &staff_id).await?,
    )))
}

pub async fn update_visa_details(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
    Json(request): Json<UpdateVisaDetailsRequest>,
) -> Result<Json<ApiResponse<staff::Model>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state
            .services
            .staff
            .update_visa_details(kind, &staff_id, request)
            .await?,
    )))
}

pub async fn upload_photo(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<staff::Model>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    let (filename, bytes) = read_upload(multipart).await?;
    Ok(Json(ApiResponse::success(
        state
            .services
            .staff
            .attach_photo(kind, &staff_id, &filename, &bytes)
            .await?,
    )))
}

pub async fn upload_offer_letter(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<staff::Model>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    let (filename, bytes) = read_upload(multipart).await?;
    Ok(Json(ApiResponse::success(
        state
            .services
            .staff
            .attach_offer_letter(kind, &staff_id, &filename, &bytes)
            .await?,
    )))
}

/// Pulls the first file field out of a multipart body.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::ValidationError(format!("invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::ValidationError(format!("failed to read upload: {e}")))?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(ServiceError::field("file", "A file upload is required"))
}
