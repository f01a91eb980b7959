use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::attendance::{self, Entity as AttendanceEntity};
use crate::entities::enums::{AttendanceStatus, LeaveStatus, ReviewStatus, StaffKind};
use crate::entities::leave_comment::{self, Entity as LeaveCommentEntity};
use crate::entities::leave_request::{self, Entity as LeaveRequestEntity};
use crate::entities::staff;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::staff::find_for_kind;
use crate::workflow;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeaveRequest {
    /// Staff display id (`S1`, `M3`, ...)
    pub staff_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub status: Option<LeaveStatus>,
    #[serde(default)]
    pub gm_status: Option<ReviewStatus>,
    #[serde(default)]
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeaveRequest {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub status: Option<LeaveStatus>,
    pub gm_status: Option<ReviewStatus>,
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Serialize)]
pub struct LeaveRequestResponse {
    #[serde(flatten)]
    pub request: leave_request::Model,
    /// Staff display id of the owning record.
    pub output_staff_id: String,
    pub comments: Vec<leave_comment::Model>,
}

#[derive(Clone)]
pub struct LeaveService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl LeaveService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(staff_id = %request.staff_id))]
    pub async fn create(
        &self,
        kind: StaffKind,
        submitted_by: &str,
        request: CreateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ServiceError> {
        if request.from_date > request.to_date {
            return Err(ServiceError::field(
                "to_date",
                "To date must be on or after from date",
            ));
        }
        let staff = find_for_kind(&*self.db, &request.staff_id, kind).await?;

        let txn = self.db.begin().await?;
        let status = request.status.unwrap_or_default();
        let model = leave_request::ActiveModel {
            staff_id: Set(staff.id),
            staff_name: Set(staff.name.clone()),
            from_date: Set(request.from_date),
            to_date: Set(request.to_date),
            reason: Set(request.reason),
            submitted_by: Set(submitted_by.to_string()),
            status: Set(status),
            gm_status: Set(request.gm_status.unwrap_or_default()),
            mgmt_status: Set(request.mgmt_status.unwrap_or_default()),
            request_date: Set(Utc::now().date_naive()),
            ..Default::default()
        };
        let created = model.insert(&txn).await?;

        if status == LeaveStatus::Approved {
            mark_on_leave(&txn, &created).await?;
        }
        txn.commit().await?;

        Ok(LeaveRequestResponse {
            output_staff_id: staff.staff_id,
            comments: Vec::new(),
            request: created,
        })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        kind: StaffKind,
        staff_display_id: Option<String>,
    ) -> Result<Vec<LeaveRequestResponse>, ServiceError> {
        let mut query = LeaveRequestEntity::find()
            .find_also_related(staff::Entity)
            .filter(staff::Column::Kind.eq(kind));
        if let Some(display_id) = staff_display_id {
            query = query.filter(staff::Column::StaffId.eq(display_id));
        }
        let rows = query
            .order_by_desc(leave_request::Column::Id)
            .all(&*self.db)
            .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for (request, staff) in rows {
            let staff =
                staff.ok_or_else(|| ServiceError::InternalError("dangling staff ref".into()))?;
            let comments = self.comments_for(request.id).await?;
            responses.push(LeaveRequestResponse {
                output_staff_id: staff.staff_id,
                comments,
                request,
            });
        }
        Ok(responses)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: StaffKind, id: i32) -> Result<LeaveRequestResponse, ServiceError> {
        let (request, staff) = self.find_scoped(kind, id).await?;
        let comments = self.comments_for(request.id).await?;
        Ok(LeaveRequestResponse {
            output_staff_id: staff.staff_id,
            comments,
            request,
        })
    }

    /// Partial update. Approval transitions synchronize attendance: newly
    /// approved spans are marked `On Leave`; leaving the approved state
    /// removes those rows again.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        kind: StaffKind,
        id: i32,
        update: UpdateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ServiceError> {
        let (existing, staff) = self.find_scoped(kind, id).await?;
        let was_approved = existing.status == LeaveStatus::Approved;

        let from_date = update.from_date.unwrap_or(existing.from_date);
        let to_date = update.to_date.unwrap_or(existing.to_date);
        if from_date > to_date {
            return Err(ServiceError::field(
                "to_date",
                "To date must be on or after from date",
            ));
        }
        let new_status = update.status.unwrap_or(existing.status);

        let txn = self.db.begin().await?;
        let mut active: leave_request::ActiveModel = existing.into();
        active.from_date = Set(from_date);
        active.to_date = Set(to_date);
        if let Some(reason) = update.reason {
            active.reason = Set(reason);
        }
        active.status = Set(new_status);
        if let Some(gm_status) = update.gm_status {
            active.gm_status = Set(gm_status);
        }
        if let Some(mgmt_status) = update.mgmt_status {
            active.mgmt_status = Set(mgmt_status);
        }
        let updated = active.update(&txn).await?;

        if was_approved && new_status != LeaveStatus::Approved {
            clear_on_leave(&txn, &updated).await?;
        } else if new_status == LeaveStatus::Approved {
            mark_on_leave(&txn, &updated).await?;
        }
        txn.commit().await?;

        info!(leave_request_id = id, status = ?new_status, "leave request updated");
        self.event_sender
            .send(Event::LeaveStatusChanged {
                leave_request_id: id,
                new_status: format!("{new_status:?}"),
            })
            .await;

        let comments = self.comments_for(updated.id).await?;
        Ok(LeaveRequestResponse {
            output_staff_id: staff.staff_id,
            comments,
            request: updated,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, kind: StaffKind, id: i32) -> Result<(), ServiceError> {
        let (request, _) = self.find_scoped(kind, id).await?;
        request.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self, comment))]
    pub async fn add_comment(
        &self,
        kind: StaffKind,
        id: i32,
        commenter: &str,
        comment: String,
    ) -> Result<leave_comment::Model, ServiceError> {
        if comment.trim().is_empty() {
            return Err(ServiceError::field("comment", "Comment is required"));
        }
        let (request, _) = self.find_scoped(kind, id).await?;
        let model = leave_comment::ActiveModel {
            leave_request_id: Set(request.id),
            comment: Set(comment),
            commenter: Set(commenter.to_string()),
            comment_date: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    /// Only the original commenter may remove a comment.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        kind: StaffKind,
        id: i32,
        comment_id: i32,
        requester: &str,
    ) -> Result<(), ServiceError> {
        let (request, _) = self.find_scoped(kind, id).await?;
        let comment = LeaveCommentEntity::find_by_id(comment_id)
            .filter(leave_comment::Column::LeaveRequestId.eq(request.id))
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
    ) -> Result<(leave_request::Model, staff::Model), ServiceError> {
        let row = LeaveRequestEntity::find_by_id(id)
            .find_also_related(staff::Entity)
            .one(&*self.db)
            .await?;
        match row {
            Some((request, Some(staff))) if staff.kind == kind => Ok((request, staff)),
            _ => Err(ServiceError::NotFound("Leave request not found".to_string())),
        }
    }

    async fn comments_for(&self, request_id: i32) -> Result<Vec<leave_comment::Model>, ServiceError> {
        Ok(LeaveCommentEntity::find()
            .filter(leave_comment::Column::LeaveRequestId.eq(request_id))
            .order_by_asc(leave_comment::Column::Id)
            .all(&*self.db)
            .await?)
    }
}

/// Creates or flips an attendance row to `On Leave` for each day of the
/// span.
async fn mark_on_leave<C: ConnectionTrait>(
    db: &C,
    request: &leave_request::Model,
) -> Result<(), ServiceError> {
    for day in workflow::date_span(request.from_date, request.to_date) {
        let existing = AttendanceEntity::find()
            .filter(attendance::Column::StaffId.eq(request.staff_id))
            .filter(attendance::Column::Date.eq(day))
            .one(db)
            .await?;
        match existing {
            Some(record) if record.status != AttendanceStatus::OnLeave => {
                let mut active: attendance::ActiveModel = record.into();
                active.status = Set(AttendanceStatus::OnLeave);
                active.reason = Set(Some(request.reason.clone()));
                active.update(db).await?;
            }
            Some(_) => {}
            None => {
                attendance::ActiveModel {
                    staff_id: Set(request.staff_id),
                    date: Set(day),
                    status: Set(AttendanceStatus::OnLeave),
                    reason: Set(Some(request.reason.clone())),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }
    }
    Ok(())
}

/// Removes the `On Leave` rows this request created.
async fn clear_on_leave<C: ConnectionTrait>(
    db: &C,
    request: &leave_request::Model,
) -> Result<(), ServiceError> {
    AttendanceEntity::delete_many()
        .filter(attendance::Column::StaffId.eq(request.staff_id))
        .filter(attendance::Column::Date.between(request.from_date, request.to_date))
        .filter(attendance::Column::Status.eq(AttendanceStatus::OnLeave))
        .filter(attendance::Column::Reason.eq(request.reason.clone()))
        .exec(db)
        .await?;
    Ok(())
}
