use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::attendance::{self, Entity as AttendanceEntity};
use crate::entities::enums::{AttendanceStatus, StaffKind};
use crate::entities::staff;
use crate::errors::ServiceError;
use crate::services::staff::find_for_kind;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAttendanceRequest {
    /// Staff display id (`S1`, `M3`, ...)
    pub staff_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceResponse {
    pub id: i32,
    pub staff_id: String,
    pub staff_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub reason: Option<String>,
}

fn to_response(record: attendance::Model, staff: &staff::Model) -> AttendanceResponse {
    AttendanceResponse {
        id: record.id,
        staff_id: staff.staff_id.clone(),
        staff_name: staff.name.clone(),
        date: record.date,
        status: record.status,
        reason: record.reason,
    }
}

#[derive(Clone)]
pub struct AttendanceService {
    db: Arc<DbPool>,
}

impl AttendanceService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(staff_id = %request.staff_id, date = %request.date))]
    pub async fn create(
        &self,
        kind: StaffKind,
        request: CreateAttendanceRequest,
    ) -> Result<AttendanceResponse, ServiceError> {
        let staff = find_for_kind(&*self.db, &request.staff_id, kind).await?;

        let existing = AttendanceEntity::find()
            .filter(attendance::Column::StaffId.eq(staff.id))
            .filter(attendance::Column::Date.eq(request.date))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::field(
                "date",
                format!(
                    "Attendance for {} on {} already exists",
                    staff.staff_id, request.date
                ),
            ));
        }

        let model = attendance::ActiveModel {
            staff_id: Set(staff.id),
            date: Set(request.date),
            status: Set(request.status),
            reason: Set(request.reason),
            ..Default::default()
        };
        let created = model.insert(&*self.db).await?;
        Ok(to_response(created, &staff))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        kind: StaffKind,
        staff_display_id: Option<String>,
    ) -> Result<Vec<AttendanceResponse>, ServiceError> {
        let mut query = AttendanceEntity::find()
            .find_also_related(staff::Entity)
            .filter(staff::Column::Kind.eq(kind));
        if let Some(display_id) = staff_display_id {
            query = query.filter(staff::Column::StaffId.eq(display_id));
        }
        let rows = query
            .order_by_desc(attendance::Column::Date)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(record, staff)| staff.map(|s| to_response(record, &s)))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        kind: StaffKind,
        staff_display_id: &str,
        date: NaiveDate,
    ) -> Result<AttendanceResponse, ServiceError> {
        let (record, staff) = self.find_record(kind, staff_display_id, date).await?;
        Ok(to_response(record, &staff))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        kind: StaffKind,
        staff_display_id: &str,
        date: NaiveDate,
        request: UpdateAttendanceRequest,
    ) -> Result<AttendanceResponse, ServiceError> {
        let (record, staff) = self.find_record(kind, staff_display_id, date).await?;

        let mut active: attendance::ActiveModel = record.into();
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(reason) = request.reason {
            active.reason = Set(Some(reason));
        }
        let updated = active.update(&*self.db).await?;
        Ok(to_response(updated, &staff))
    }

    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        kind: StaffKind,
        staff_display_id: &str,
        date: NaiveDate,
    ) -> Result<(), ServiceError> {
        let (record, _) = self.find_record(kind, staff_display_id, date).await?;
        record.delete(&*self.db).await?;
        Ok(())
    }

    async fn find_record(
        &self,
        kind: StaffKind,
        staff_display_id: &str,
        date: NaiveDate,
    ) -> Result<(attendance::Model, staff::Model), ServiceError> {
        let staff = find_for_kind(&*self.db, staff_display_id, kind).await?;
        let record = AttendanceEntity::find()
            .filter(attendance::Column::StaffId.eq(staff.id))
            .filter(attendance::Column::Date.eq(date))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(
                    "Attendance record not found for the given staff and date".to_string(),
                )
            })?;
        Ok((record, staff))
    }
}
