use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::enums::{DecisionStatus, ReviewStatus, StaffKind};
use crate::entities::overtime::{self, Entity as OvertimeEntity};
use crate::entities::overtime_comment::{self, Entity as OvertimeCommentEntity};
use crate::entities::staff;
use crate::errors::ServiceError;
use crate::services::staff::find_for_kind;
use crate::workflow;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOvertimeRequest {
    /// Staff display id (`S1`, `M3`, ...)
    pub staff_id: String,
    pub ot_date: NaiveDate,
    pub ot_start_time: NaiveTime,
    pub ot_end_time: NaiveTime,
    pub reason: String,
    #[serde(default)]
    pub status: Option<DecisionStatus>,
    #[serde(default)]
    pub gm_status: Option<ReviewStatus>,
    #[serde(default)]
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOvertimeRequest {
    pub ot_date: Option<NaiveDate>,
    pub ot_start_time: Option<NaiveTime>,
    pub ot_end_time: Option<NaiveTime>,
    pub reason: Option<String>,
    pub status: Option<DecisionStatus>,
    pub gm_status: Option<ReviewStatus>,
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Serialize)]
pub struct OvertimeResponse {
    #[serde(flatten)]
    pub overtime: overtime::Model,
    pub output_staff_id: String,
    pub comments: Vec<overtime_comment::Model>,
}

#[derive(Clone)]
pub struct OvertimeService {
    db: Arc<DbPool>,
}

impl OvertimeService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(staff_id = %request.staff_id))]
    pub async fn create(
        &self,
        kind: StaffKind,
        submitted_by: &str,
        request: CreateOvertimeRequest,
    ) -> Result<OvertimeResponse, ServiceError> {
        if request.ot_start_time == request.ot_end_time {
            return Err(ServiceError::field(
                "ot_end_time",
                "End time must be after start time",
            ));
        }
        let staff = find_for_kind(&*self.db, &request.staff_id, kind).await?;
        let duration = workflow::overtime_duration_hours(request.ot_start_time, request.ot_end_time);

        let model = overtime::ActiveModel {
            staff_id: Set(staff.id),
            staff_name: Set(staff.name.clone()),
            ot_date: Set(request.ot_date),
            ot_start_time: Set(request.ot_start_time),
            ot_end_time: Set(request.ot_end_time),
            duration: Set(duration),
            reason: Set(request.reason),
            status: Set(request.status.unwrap_or_default()),
            gm_status: Set(request.gm_status.unwrap_or_default()),
            mgmt_status: Set(request.mgmt_status.unwrap_or_default()),
            request_date: Set(Utc::now().date_naive()),
            submitted_by: Set(submitted_by.to_string()),
            ..Default::default()
        };
        let created = model.insert(&*self.db).await?;

        Ok(OvertimeResponse {
            output_staff_id: staff.staff_id,
            comments: Vec::new(),
            overtime: created,
        })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        kind: StaffKind,
        staff_display_id: Option<String>,
    ) -> Result<Vec<OvertimeResponse>, ServiceError> {
        let mut query = OvertimeEntity::find()
            .find_also_related(staff::Entity)
            .filter(staff::Column::Kind.eq(kind));
        if let Some(display_id) = staff_display_id {
            query = query.filter(staff::Column::StaffId.eq(display_id));
        }
        let rows = query
            .order_by_desc(overtime::Column::Id)
            .all(&*self.db)
            .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for (record, staff) in rows {
            let staff =
                staff.ok_or_else(|| ServiceError::InternalError("dangling staff ref".into()))?;
            let comments = self.comments_for(record.id).await?;
            responses.push(OvertimeResponse {
                output_staff_id: staff.staff_id,
                comments,
                overtime: record,
            });
        }
        Ok(responses)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: StaffKind, id: i32) -> Result<OvertimeResponse, ServiceError> {
        let (record, staff) = self.find_scoped(kind, id).await?;
        let comments = self.comments_for(record.id).await?;
        Ok(OvertimeResponse {
            output_staff_id: staff.staff_id,
            comments,
            overtime: record,
        })
    }

    /// Partial update; the duration is always recomputed from the
    /// effective time span.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        kind: StaffKind,
        id: i32,
        update: UpdateOvertimeRequest,
    ) -> Result<OvertimeResponse, ServiceError> {
        let (existing, staff) = self.find_scoped(kind, id).await?;

        let start = update.ot_start_time.unwrap_or(existing.ot_start_time);
        let end = update.ot_end_time.unwrap_or(existing.ot_end_time);
        if start == end {
            return Err(ServiceError::field(
                "ot_end_time",
                "End time must be after start time",
            ));
        }

        let mut active: overtime::ActiveModel = existing.into();
        if let Some(ot_date) = update.ot_date {
            active.ot_date = Set(ot_date);
        }
        active.ot_start_time = Set(start);
        active.ot_end_time = Set(end);
        active.duration = Set(workflow::overtime_duration_hours(start, end));
        if let Some(reason) = update.reason {
            active.reason = Set(reason);
        }
        if let Some(status) = update.status {
            active.status = Set(status);
        }
        if let Some(gm_status) = update.gm_status {
            active.gm_status = Set(gm_status);
        }
        if let Some(mgmt_status) = update.mgmt_status {
            active.mgmt_status = Set(mgmt_status);
        }
        let updated = active.update(&*self.db).await?;

        let comments = self.comments_for(updated.id).await?;
        Ok(OvertimeResponse {
            output_staff_id: staff.staff_id,
            comments,
            overtime: updated,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, kind: StaffKind, id: i32) -> Result<(), ServiceError> {
        let (record, _) = self.find_scoped(kind, id).await?;
        record.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self, comment))]
    pub async fn add_comment(
        &self,
        kind: StaffKind,
        id: i32,
        commenter: &str,
        comment: String,
    ) -> Result<overtime_comment::Model, ServiceError> {
        if comment.trim().is_empty() {
            return Err(ServiceError::field("comment", "Comment is required"));
        }
        let (record, _) = self.find_scoped(kind, id).await?;
        let model = overtime_comment::ActiveModel {
            overtime_id: Set(record.id),
            comment: Set(comment),
            commenter: Set(commenter.to_string()),
            comment_date: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        kind: StaffKind,
        id: i32,
        comment_id: i32,
        requester: &str,
    ) -> Result<(), ServiceError> {
        let (record, _) = self.find_scoped(kind, id).await?;
        let comment = OvertimeCommentEntity::find_by_id(comment_id)
            .filter(overtime_comment::Column::OvertimeId.eq(record.id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment not found".to_string()))?;
        if comment.commenter != requester {
            return Err(ServiceError::Forbidden(
                "You do not have permission to delete this comment".to_string(),
            ));
        }
        comment.delete(&*self.db).await?;
        Ok(())
    }

    async fn find_scoped(
        &self,
        kind: StaffKind,
        id: i32,
    ) -> Result<(overtime::Model, staff::Model), ServiceError> {
        let row = OvertimeEntity::find_by_id(id)
            .find_also_related(staff::Entity)
            .one(&*self.db)
            .await?;
        match row {
            Some((record, Some(staff))) if staff.kind == kind => Ok((record, staff)),
            _ => Err(ServiceError::NotFound(
                "Overtime request not found".to_string(),
            )),
        }
    }

    async fn comments_for(
        &self,
        overtime_id: i32,
    ) -> Result<Vec<overtime_comment::Model>, ServiceError> {
        Ok(OvertimeCommentEntity::find()
            .filter(overtime_comment::Column::OvertimeId.eq(overtime_id))
            .order_by_asc(overtime_comment::Column::Id)
            .all(&*self.db)
            .await?)
    }
}
