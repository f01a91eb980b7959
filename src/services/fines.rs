use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::enums::{DecisionStatus, ReviewStatus, StaffKind};
use crate::entities::fine::{self, Entity as FineEntity};
use crate::entities::fine_comment::{self, Entity as FineCommentEntity};
use crate::entities::staff;
use crate::errors::ServiceError;
use crate::services::staff::find_for_kind;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFineRequest {
    /// Staff display id (`S1`, `M3`, ...)
    pub staff_id: String,
    pub fine_amount: Decimal,
    pub reason: String,
    #[serde(default)]
    pub status: Option<DecisionStatus>,
    #[serde(default)]
    pub gm_status: Option<ReviewStatus>,
    #[serde(default)]
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFineRequest {
    pub fine_amount: Option<Decimal>,
    pub reason: Option<String>,
    pub status: Option<DecisionStatus>,
    pub gm_status: Option<ReviewStatus>,
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Serialize)]
pub struct FineResponse {
    #[serde(flatten)]
    pub fine: fine::Model,
    pub output_staff_id: String,
    pub comments: Vec<fine_comment::Model>,
}

fn check_amount(amount: Decimal) -> Result<(), ServiceError> {
    if amount <= Decimal::ZERO {
        return Err(ServiceError::field(
            "fine_amount",
            "Fine amount must be greater than zero",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct FineService {
    db: Arc<DbPool>,
}

impl FineService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(staff_id = %request.staff_id))]
    pub async fn create(
        &self,
        kind: StaffKind,
        submitted_by: &str,
        request: CreateFineRequest,
    ) -> Result<FineResponse, ServiceError> {
        check_amount(request.fine_amount)?;
        let staff = find_for_kind(&*self.db, &request.staff_id, kind).await?;

        let model = fine::ActiveModel {
            staff_id: Set(staff.id),
            staff_name: Set(staff.name.clone()),
            fine_amount: Set(request.fine_amount),
            reason: Set(request.reason),
            status: Set(request.status.unwrap_or_default()),
            gm_status: Set(request.gm_status.unwrap_or_default()),
            mgmt_status: Set(request.mgmt_status.unwrap_or_default()),
            request_date: Set(Utc::now().date_naive()),
            submitted_by: Set(submitted_by.to_string()),
            ..Default::default()
        };
        let created = model.insert(&*self.db).await?;

        Ok(FineResponse {
            output_staff_id: staff.staff_id,
            comments: Vec::new(),
            fine: created,
        })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        kind: StaffKind,
        staff_display_id: Option<String>,
    ) -> Result<Vec<FineResponse>, ServiceError> {
        let mut query = FineEntity::find()
            .find_also_related(staff::Entity)
            .filter(staff::Column::Kind.eq(kind));
        if let Some(display_id) = staff_display_id {
            query = query.filter(staff::Column::StaffId.eq(display_id));
        }
        let rows = query
            .order_by_desc(fine::Column::Id)
            .all(&*self.db)
            .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for (record, staff) in rows {
            let staff =
                staff.ok_or_else(|| ServiceError::InternalError("dangling staff ref".into()))?;
            let comments = self.comments_for(record.id).await?;
            responses.push(FineResponse {
                output_staff_id: staff.staff_id,
                comments,
                fine: record,
            });
        }
        Ok(responses)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: StaffKind, id: i32) -> Result<FineResponse, ServiceError> {
        let (record, staff) = self.find_scoped(kind, id).await?;
        let comments = self.comments_for(record.id).await?;
        Ok(FineResponse {
            output_staff_id: staff.staff_id,
            comments,
            fine: record,
        })
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        kind: StaffKind,
        id: i32,
        update: UpdateFineRequest,
    ) -> Result<FineResponse, ServiceError> {
        let (existing, staff) = self.find_scoped(kind, id).await?;
        if let Some(amount) = update.fine_amount {
            check_amount(amount)?;
        }

        let mut active: fine::ActiveModel = existing.into();
        if let Some(amount) = update.fine_amount {
            active.fine_amount = Set(amount);
        }
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
        Ok(FineResponse {
            output_staff_id: staff.staff_id,
            comments,
            fine: updated,
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
    ) -> Result<fine_comment::Model, ServiceError> {
        if comment.trim().is_empty() {
            return Err(ServiceError::field("comment", "Comment is required"));
        }
        let (record, _) = self.find_scoped(kind, id).await?;
        let model = fine_comment::ActiveModel {
            fine_id: Set(record.id),
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
        let comment = FineCommentEntity::find_by_id(comment_id)
            .filter(fine_comment::Column::FineId.eq(record.id))
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
    ) -> Result<(fine::Model, staff::Model), ServiceError> {
        let row = FineEntity::find_by_id(id)
            .find_also_related(staff::Entity)
            .one(&*self.db)
            .await?;
        match row {
            Some((record, Some(staff))) if staff.kind == kind => Ok((record, staff)),
            _ => Err(ServiceError::NotFound("Fine not found".to_string())),
        }
    }

    async fn comments_for(&self, fine_id: i32) -> Result<Vec<fine_comment::Model>, ServiceError> {
        Ok(FineCommentEntity::find()
            .filter(fine_comment::Column::FineId.eq(fine_id))
            .order_by_asc(fine_comment::Column::Id)
            .all(&*self.db)
            .await?)
    }
}
