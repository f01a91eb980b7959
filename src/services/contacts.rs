use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::contact::{self, Entity as ContactEntity};
use crate::errors::ServiceError;
use crate::storage::{MediaStore, LICENSES};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "Contact name is required"))]
    pub contact_name: String,
    #[validate(email(message = "A valid company email is required"))]
    pub company_email: String,
    #[validate(email(message = "A valid contact email is required"))]
    pub contact_email: String,
    #[validate(length(min = 1, message = "Company number is required"))]
    pub company_number: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_number: String,
    #[validate(length(min = 1, message = "License number is required"))]
    pub license_number: String,
    pub license_expiry_date: NaiveDate,
    #[validate(length(min = 1, message = "TIRN number is required"))]
    pub tirn_number: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateContactRequest {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "A valid company email is required"))]
    pub company_email: Option<String>,
    #[validate(email(message = "A valid contact email is required"))]
    pub contact_email: Option<String>,
    pub company_number: Option<String>,
    pub contact_number: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub tirn_number: Option<String>,
}

/// Company lookup rows backing the lookup endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyEntry {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
}

#[derive(Clone)]
pub struct ContactService {
    db: Arc<DbPool>,
    media: MediaStore,
}

impl ContactService {
    pub fn new(db: Arc<DbPool>, media: MediaStore) -> Self {
        Self { db, media }
    }

    #[instrument(skip(self, request), fields(company = %request.company_name))]
    pub async fn create(
        &self,
        created_by: Uuid,
        request: CreateContactRequest,
    ) -> Result<contact::Model, ServiceError> {
        request.validate()?;
        let model = contact::ActiveModel {
            company_name: Set(request.company_name),
            contact_name: Set(request.contact_name),
            company_email: Set(request.company_email),
            contact_email: Set(request.contact_email),
            company_number: Set(request.company_number),
            contact_number: Set(request.contact_number),
            license_number: Set(request.license_number),
            license_expiry_date: Set(request.license_expiry_date),
            tirn_number: Set(request.tirn_number),
            created_by: Set(created_by),
            created_on: Set(Utc::now().into()),
            license_file: Set(None),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    pub async fn list(&self) -> Result<Vec<contact::Model>, ServiceError> {
        Ok(ContactEntity::find()
            .order_by_asc(contact::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<contact::Model, ServiceError> {
        ContactEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Contact {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: UpdateContactRequest,
    ) -> Result<contact::Model, ServiceError> {
        request.validate()?;
        let existing = self.get(id).await?;

        let mut active: contact::ActiveModel = existing.into();
        if let Some(company_name) = request.company_name {
            active.company_name = Set(company_name);
        }
        if let Some(contact_name) = request.contact_name {
            active.contact_name = Set(contact_name);
        }
        if let Some(company_email) = request.company_email {
            active.company_email = Set(company_email);
        }
        if let Some(contact_email) = request.contact_email {
            active.contact_email = Set(contact_email);
        }
        if let Some(company_number) = request.company_number {
            active.company_number = Set(company_number);
        }
        if let Some(contact_number) = request.contact_number {
            active.contact_number = Set(contact_number);
        }
        if let Some(license_number) = request.license_number {
            active.license_number = Set(license_number);
        }
        if let Some(license_expiry_date) = request.license_expiry_date {
            active.license_expiry_date = Set(license_expiry_date);
        }
        if let Some(tirn_number) = request.tirn_number {
            active.tirn_number = Set(tirn_number);
        }
        Ok(active.update(&*self.db).await?)
    }

    /// Deleting a contact removes its stored license file as well.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        if let Some(license) = &existing.license_file {
            self.media.delete(license).await;
        }
        existing.delete(&*self.db).await?;
        Ok(())
    }

    /// Stores an uploaded license, replacing any previous file on disk.
    #[instrument(skip(self, bytes))]
    pub async fn attach_license(
        &self,
        id: i32,
        filename: &str,
        bytes: &[u8],
    ) -> Result<contact::Model, ServiceError> {
        let existing = self.get(id).await?;
        if let Some(previous) = &existing.license_file {
            self.media.delete(previous).await;
        }
        let stored = self.media.save(LICENSES, filename, bytes).await?;
        let mut active: contact::ActiveModel = existing.into();
        active.license_file = Set(Some(stored));
        Ok(active.update(&*self.db).await?)
    }

    /// Finds the contact for a company name, if one exists.
    pub async fn find_by_company(&self, company_name: &str) -> Result<Option<contact::Model>, ServiceError> {
        Ok(ContactEntity::find()
            .filter(contact::Column::CompanyName.eq(company_name))
            .one(&*self.db)
            .await?)
    }

    pub async fn find_by_company_and_number(
        &self,
        company_name: &str,
        contact_number: &str,
    ) -> Result<Option<contact::Model>, ServiceError> {
        Ok(ContactEntity::find()
            .filter(contact::Column::CompanyName.eq(company_name))
            .filter(contact::Column::ContactNumber.eq(contact_number))
            .one(&*self.db)
            .await?)
    }

    /// Distinct (company, contact number) pairs for the incoming-call lookup.
    pub async fn incoming_companies(&self) -> Result<Vec<CompanyEntry>, ServiceError> {
        let rows: Vec<(String, String)> = ContactEntity::find()
            .select_only()
            .column(contact::Column::CompanyName)
            .column(contact::Column::ContactNumber)
            .distinct()
            .into_tuple()
            .all(&*self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(company_name, contact_number)| CompanyEntry {
                company_name,
                contact_number: Some(contact_number),
                contact_email: None,
                company_email: None,
            })
            .collect())
    }

    /// Distinct (company, emails) rows for the quotation and order forms.
    pub async fn quotation_companies(&self) -> Result<Vec<CompanyEntry>, ServiceError> {
        let rows: Vec<(String, String, String)> = ContactEntity::find()
            .select_only()
            .column(contact::Column::CompanyName)
            .column(contact::Column::ContactEmail)
            .column(contact::Column::CompanyEmail)
            .distinct()
            .into_tuple()
            .all(&*self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(company_name, contact_email, company_email)| CompanyEntry {
                company_name,
                contact_number: None,
                contact_email: Some(contact_email),
                company_email: Some(company_email),
            })
            .collect())
    }
}
