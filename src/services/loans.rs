use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::enums::{LoanStatus, ReviewStatus, StaffKind};
use crate::entities::loan::{self, Entity as LoanEntity};
use crate::entities::loan_comment::{self, Entity as LoanCommentEntity};
use crate::entities::staff;
use crate::errors::ServiceError;
use crate::services::staff::find_for_kind;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoanRequest {
    /// Staff display id (`S1`, `M3`, ...)
    pub staff_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub loan_status: Option<LoanStatus>,
    #[serde(default)]
    pub gm_status: Option<ReviewStatus>,
    #[serde(default)]
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLoanRequest {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub loan_status: Option<LoanStatus>,
    pub gm_status: Option<ReviewStatus>,
    pub mgmt_status: Option<ReviewStatus>,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    #[serde(flatten)]
    pub loan: loan::Model,
    pub output_staff_id: String,
    pub comments: Vec<loan_comment::Model>,
}

#[derive(Clone)]
pub struct LoanService {
    db: Arc<DbPool>,
}

impl LoanService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(staff_id = %request.staff_id))]
    pub async fn create(
        &self,
        kind: StaffKind,
        submitted_by: &str,
        request: CreateLoanRequest,
    ) -> Result<LoanResponse, ServiceError> {
        if request.from_date > request.to_date {
            return Err(ServiceError::field(
                "to_date",
                "To date must be on or after from date",
            ));
        }
        let staff = find_for_kind(&*self.db, &request.staff_id, kind).await?;

        let model = loan::ActiveModel {
            staff_id: Set(staff.id),
            staff_name: Set(staff.name.clone()),
            from_date: Set(request.from_date),
            to_date: Set(request.to_date),
            reason: Set(request.reason),
            submitted_by: Set(submitted_by.to_string()),
            loan_status: Set(request.loan_status.unwrap_or_default()),
            gm_status: Set(request.gm_status.unwrap_or_default()),
            mgmt_status: Set(request.mgmt_status.unwrap_or_default()),
            request_date: Set(Utc::now().date_naive()),
            ..Default::default()
        };
        let created = model.insert(&*self.db).await?;

        Ok(LoanResponse {
            output_staff_id: staff.staff_id,
            comments: Vec::new(),
            loan: created,
        })
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        kind: StaffKind,
        staff_display_id: Option<String>,
    ) -> Result<Vec<LoanResponse>, ServiceError> {
        let mut query = LoanEntity::find()
            .find_also_related(staff::Entity)
            .filter(staff::Column::Kind.eq(kind));
        if let Some(display_id) = staff_display_id {
            query = query.filter(staff::Column::StaffId.eq(display_id));
        }
        let rows = query
            .order_by_desc(loan::Column::Id)
            .all(&*self.db)
            .await?;

        let mut responses = Vec::with_capacity(rows.len());
        for (record, staff) in rows {
            let staff =
                staff.ok_or_else(|| ServiceError::InternalError("dangling staff ref".into()))?;
            let comments = self.comments_for(record.id).await?;
            responses.push(LoanResponse {
                output_staff_id: staff.staff_id,
                comments,
                loan: record,
            });
        }
        Ok(responses)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: StaffKind, id: i32) -> Result<LoanResponse, ServiceError> {
        let (record, staff) = self.find_scoped(kind, id).await?;
        let comments = self.comments_for(record.id).await?;
        Ok(LoanResponse {
            output_staff_id: staff.staff_id,
            comments,
            loan: record,
        })
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        kind: StaffKind,
        id: i32,
        update: UpdateLoanRequest,
    ) -> Result<LoanResponse, ServiceError> {
        let (existing, staff) = self.find_scoped(kind, id).await?;

        let from_date = update.from_date.unwrap_or(existing.from_date);
        let to_date = update.to_date.unwrap_or(existing.to_date);
        if from_date > to_date {
            return Err(ServiceError::field(
                "to_date",
                "To date must be on or after from date",
            ));
        }

        let mut active: loan::ActiveModel = existing.into();
        active.from_date = Set(from_date);
        active.to_date = Set(to_date);
        if let Some(reason) = update.reason {
            active.reason = Set(reason);
        }
        if let Some(loan_status) = update.loan_status {
            active.loan_status = Set(loan_status);
        }
        if let Some(gm_status) = update.gm_status {
            active.gm_status = Set(gm_status);
        }
        if let Some(mgmt_status) = update.mgmt_status {
            active.mgmt_status = Set(mgmt_status);
        }
        let updated = active.update(&*self.db).await?;

        let comments = self.comments_for(updated.id).await?;
        Ok(LoanResponse {
            output_staff_id: staff.staff_id,
            comments,
            loan: updated,
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
    ) -> Result<loan_comment::Model, ServiceError> {
        if comment.trim().is_empty() {
            return Err(ServiceError::field("comment", "Comment is required"));
        }
        let (record, _) = self.find_scoped(kind, id).await?;
        let model = loan_comment::ActiveModel {
            loan_id: Set(record.id),
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
        let comment = LoanCommentEntity::find_by_id(comment_id)
            .filter(loan_comment::Column::LoanId.eq(record.id))
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
    ) -> Result<(loan::Model, staff::Model), ServiceError> {
        let row = LoanEntity::find_by_id(id)
            .find_also_related(staff::Entity)
            .one(&*self.db)
            .await?;
        match row {
            Some((record, Some(staff))) if staff.kind == kind => Ok((record, staff)),
            _ => Err(ServiceError::NotFound("Loan not found".to_string())),
        }
    }

    async fn comments_for(&self, loan_id: i32) -> Result<Vec<loan_comment::Model>, ServiceError> {
        Ok(LoanCommentEntity::find()
            .filter(loan_comment::Column::LoanId.eq(loan_id))
            .order_by_asc(loan_comment::Column::Id)
            .all(&*self.db)
            .await?)
    }
}
