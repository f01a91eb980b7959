use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::enums::JobCardStatus;
use crate::entities::job_card::{self, Entity as JobCardEntity};
use crate::entities::sales_order::Entity as SalesOrderEntity;
use crate::errors::ServiceError;
use crate::services::ids;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateJobCardRequest {
    pub company_name: String,
    pub work_description: String,
    pub assigned_to: String,
    #[serde(default)]
    pub sales_order_id: Option<i32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateJobCardRequest {
    pub work_description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<JobCardStatus>,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

pub struct JobCardService {
    db: Arc<DbPool>,
}

impl JobCardService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(company = %request.company_name))]
    pub async fn create(
        &self,
        created_by: Uuid,
        request: CreateJobCardRequest,
    ) -> Result<job_card::Model, ServiceError> {
        if request.company_name.trim().is_empty() {
            return Err(ServiceError::field("company_name", "This field is required"));
        }
        if request.work_description.trim().is_empty() {
            return Err(ServiceError::field(
                "work_description",
                "This field is required",
            ));
        }
        if request.assigned_to.trim().is_empty() {
            return Err(ServiceError::field("assigned_to", "This field is required"));
        }
        if let Some(sales_order_id) = request.sales_order_id {
            let exists = SalesOrderEntity::find_by_id(sales_order_id)
                .one(&*self.db)
                .await?
                .is_some();
            if !exists {
                return Err(ServiceError::field(
                    "sales_order_id",
                    format!("Sales order {sales_order_id} does not exist"),
                ));
            }
        }

        let job_card_no = self.allocate_job_card_no().await?;
        let model = job_card::ActiveModel {
            job_card_no: Set(job_card_no),
            sales_order_id: Set(request.sales_order_id),
            company_name: Set(request.company_name),
            work_description: Set(request.work_description),
            assigned_to: Set(request.assigned_to),
            status: Set(JobCardStatus::Open),
            start_date: Set(request.start_date),
            completion_date: Set(None),
            remarks: Set(request.remarks),
            created_by: Set(Some(created_by)),
            created_on: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<job_card::Model>, ServiceError> {
        Ok(JobCardEntity::find()
            .order_by_desc(job_card::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<job_card::Model, ServiceError> {
        JobCardEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Job card {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: UpdateJobCardRequest,
    ) -> Result<job_card::Model, ServiceError> {
        let existing = self.get(id).await?;

        let start_date = request.start_date.or(existing.start_date);
        let completion_date = request.completion_date.or(existing.completion_date);
        if let (Some(start), Some(end)) = (start_date, completion_date) {
            if end < start {
                return Err(ServiceError::field(
                    "completion_date",
                    "Completion date must be on or after start date",
                ));
            }
        }

        let mut active: job_card::ActiveModel = existing.into();
        if let Some(work_description) = request.work_description {
            active.work_description = Set(work_description);
        }
        if let Some(assigned_to) = request.assigned_to {
            active.assigned_to = Set(assigned_to);
        }
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        active.start_date = Set(start_date);
        active.completion_date = Set(completion_date);
        if let Some(remarks) = request.remarks {
            active.remarks = Set(remarks);
        }
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    async fn allocate_job_card_no(&self) -> Result<String, ServiceError> {
        for _ in 0..ids::MAX_GENERATION_ATTEMPTS {
            let job_card_no = ids::random_document_no();
            let taken = JobCardEntity::find()
                .filter(job_card::Column::JobCardNo.eq(job_card_no.clone()))
                .one(&*self.db)
                .await?
                .is_some();
            if !taken {
                return Ok(job_card_no);
            }
        }
        Err(ServiceError::Conflict(
            "Could not allocate a unique job card number".to_string(),
        ))
    }
}
