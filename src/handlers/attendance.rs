use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::handlers::{staff_kind, StaffIdQuery};
use crate::services::attendance::{
    AttendanceResponse, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:kind/attendance", get(list_attendance).post(create_attendance))
        .route(
            "/:kind/attendance/:staff_id/:date",
            get(get_attendance)
                .put(update_attendance)
                .delete(delete_attendance),
        )
}

pub async fn list_attendance(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
    Query(query): Query<StaffIdQuery>,
) -> Result<Json<ApiResponse<Vec<AttendanceResponse>>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.attendance.list(kind, query.staff_id).await?,
    )))
}

pub async fn create_attendance(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
    Json(request): Json<CreateAttendanceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = staff_kind(&kind)?;
    let created = state.services.attendance.create(kind, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_attendance(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id, date)): Path<(String, String, NaiveDate)>,
) -> Result<Json<ApiResponse<AttendanceResponse>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.attendance.get(kind, &staff_id, date).await?,
    )))
}

pub async fn update_attendance(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id, date)): Path<(String, String, NaiveDate)>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> Result<Json<ApiResponse<AttendanceResponse>>, ServiceError> {
    let kind = staff_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state
            .services
            .attendance
            .update(kind, &staff_id, date, request)
            .await?,
    )))
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, staff_id, date)): Path<(String, String, NaiveDate)>,
) -> Result<StatusCode, ServiceError> {
    let kind = staff_kind(&kind)?;
    state
        .services
        .attendance
        .delete(kind, &staff_id, date)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
