use std::sync::Arc;

use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::enums::SalesStatus;
use crate::entities::inquiry::{self, Entity as InquiryEntity};
use crate::errors::ServiceError;
use crate::services::contacts::ContactService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInquiryRequest {
    pub company_name: String,
    pub contact_number: String,
    pub inquiry: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInquiryRequest {
    pub status: Option<SalesStatus>,
    pub inquiry: Option<String>,
}

#[derive(Clone)]
pub struct InquiryService {
    db: Arc<DbPool>,
    contacts: ContactService,
}

impl InquiryService {
    pub fn new(db: Arc<DbPool>, contacts: ContactService) -> Self {
        Self { db, contacts }
    }

    /// Creates an inquiry for a known company; the contact directory is
    /// the source of truth for the denormalized fields.
    #[instrument(skip(self, request), fields(company = %request.company_name))]
    pub async fn create(
        &self,
        assign_to: uuid::Uuid,
        assign_to_username: &str,
        request: CreateInquiryRequest,
    ) -> Result<inquiry::Model, ServiceError> {
        if request.company_name.trim().is_empty() {
            return Err(ServiceError::field("company_name", "This field is required"));
        }
        if request.contact_number.trim().is_empty() {
            return Err(ServiceError::field(
                "contact_number",
                "This field is required",
            ));
        }
        if request.inquiry.trim().is_empty() {
            return Err(ServiceError::field("inquiry", "This field is required"));
        }

        let contact = self
            .contacts
            .find_by_company_and_number(&request.company_name, &request.contact_number)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Company not found".to_string()))?;

        let now = Utc::now();
        let model = inquiry::ActiveModel {
            company_name: Set(contact.company_name),
            contact_name: Set(contact.contact_name),
            contact_number: Set(contact.contact_number),
            status: Set(SalesStatus::New),
            inquiry: Set(request.inquiry),
            assign_to: Set(Some(assign_to)),
            assign_to_username: Set(assign_to_username.to_string()),
            created_on: Set(now.into()),
            year: Set(now.year()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, year: Option<i32>) -> Result<Vec<inquiry::Model>, ServiceError> {
        let mut query = InquiryEntity::find().order_by_desc(inquiry::Column::Id);
        if let Some(year) = year {
            query = query.filter(inquiry::Column::Year.eq(year));
        }
        Ok(query.all(&*self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<inquiry::Model, ServiceError> {
        InquiryEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inquiry {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: UpdateInquiryRequest,
    ) -> Result<inquiry::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut active: inquiry::ActiveModel = existing.into();
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(text) = request.inquiry {
            active.inquiry = Set(text);
        }
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }
}
