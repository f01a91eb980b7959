use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::enums::{StaffKind, VisaStatus};
use crate::entities::staff::{self, Entity as StaffEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::storage::MediaStore;
use crate::workflow;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Passport number is required"))]
    pub passport_no: String,
    #[validate(length(min = 1, message = "Visa number is required"))]
    pub visa_no: String,
    #[validate(length(min = 1, message = "Emirates ID number is required"))]
    pub emirates_id_number: String,
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    #[validate(length(min = 1, message = "Nationality is required"))]
    pub nationality: String,
    #[validate(length(min = 1, message = "Insurance number is required"))]
    pub insurance_number: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub passport_expiry: NaiveDate,
    pub visa_expiry: NaiveDate,
    pub insurance_expiry: NaiveDate,
    pub salary: Decimal,
    #[validate(length(min = 1, message = "Emergency contact is required"))]
    pub emergency_contact: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_number: String,
    pub home_address: String,
    pub uae_address: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub passport_no: Option<String>,
    pub visa_no: Option<String>,
    pub emirates_id_number: Option<String>,
    pub designation: Option<String>,
    pub nationality: Option<String>,
    pub insurance_number: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    pub passport_expiry: Option<NaiveDate>,
    pub visa_expiry: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub emergency_contact: Option<String>,
    pub contact_number: Option<String>,
    pub home_address: Option<String>,
    pub uae_address: Option<String>,
}

/// Visa-focused update used by the visa-details resource.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVisaDetailsRequest {
    pub visa_no: Option<String>,
    pub visa_expiry: Option<NaiveDate>,
    pub emirates_id_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub uae_address: Option<String>,
}

/// Looks up a staff member by display id, scoped to the path kind.
pub async fn find_for_kind<C: ConnectionTrait>(
    db: &C,
    staff_id: &str,
    kind: StaffKind,
) -> Result<staff::Model, ServiceError> {
    StaffEntity::find()
        .filter(staff::Column::StaffId.eq(staff_id))
        .filter(staff::Column::Kind.eq(kind))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Staff {staff_id} not found")))
}

#[derive(Clone)]
pub struct StaffService {
    db: Arc<DbPool>,
    media: MediaStore,
    event_sender: EventSender,
}

impl StaffService {
    pub fn new(db: Arc<DbPool>, media: MediaStore, event_sender: EventSender) -> Self {
        Self {
            db,
            media,
            event_sender,
        }
    }

    /// Creates a staff record, assigning the next sequential display id
    /// for the kind and deriving the initial visa status.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        kind: StaffKind,
        request: CreateStaffRequest,
    ) -> Result<staff::Model, ServiceError> {
        request.validate()?;

        let staff_id = self.next_staff_id(kind).await?;
        let today = Utc::now().date_naive();
        let visa_status =
            workflow::derive_visa_status(request.visa_expiry, today, VisaStatus::NewVisa);

        let model = staff::ActiveModel {
            staff_id: Set(staff_id.clone()),
            kind: Set(kind),
            name: Set(request.name),
            passport_no: Set(request.passport_no),
            visa_no: Set(request.visa_no),
            emirates_id_number: Set(request.emirates_id_number),
            designation: Set(request.designation),
            nationality: Set(request.nationality),
            insurance_number: Set(request.insurance_number),
            email: Set(request.email),
            passport_expiry: Set(request.passport_expiry),
            visa_expiry: Set(request.visa_expiry),
            insurance_expiry: Set(request.insurance_expiry),
            salary: Set(request.salary),
            emergency_contact: Set(request.emergency_contact),
            contact_number: Set(request.contact_number),
            profile_photo: Set(None),
            offer_letter: Set(None),
            home_address: Set(request.home_address),
            uae_address: Set(request.uae_address),
            joining_date: Set(today),
            visa_status: Set(visa_status),
            ..Default::default()
        };
        let created = model.insert(&*self.db).await?;

        info!(staff_id = %staff_id, "staff record created");
        self.event_sender
            .send(Event::StaffCreated { staff_id })
            .await;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, kind: StaffKind) -> Result<Vec<staff::Model>, ServiceError> {
        let records = StaffEntity::find()
            .filter(staff::Column::Kind.eq(kind))
            .order_by_asc(staff::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(records.into_iter().map(refresh_visa_status).collect())
    }

    /// Detail read; recomputes and persists the visa status.
    #[instrument(skip(self))]
    pub async fn get(&self, kind: StaffKind, staff_id: &str) -> Result<staff::Model, ServiceError> {
        let record = find_for_kind(&*self.db, staff_id, kind).await?;
        self.persist_visa_status(record).await
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        kind: StaffKind,
        staff_id: &str,
        request: UpdateStaffRequest,
    ) -> Result<staff::Model, ServiceError> {
        request.validate()?;
        let record = find_for_kind(&*self.db, staff_id, kind).await?;

        let mut active: staff::ActiveModel = record.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(passport_no) = request.passport_no {
            active.passport_no = Set(passport_no);
        }
        if let Some(visa_no) = request.visa_no {
            active.visa_no = Set(visa_no);
        }
        if let Some(emirates_id_number) = request.emirates_id_number {
            active.emirates_id_number = Set(emirates_id_number);
        }
        if let Some(designation) = request.designation {
            active.designation = Set(designation);
        }
        if let Some(nationality) = request.nationality {
            active.nationality = Set(nationality);
        }
        if let Some(insurance_number) = request.insurance_number {
            active.insurance_number = Set(insurance_number);
        }
        if let Some(email) = request.email {
            active.email = Set(email);
        }
        if let Some(passport_expiry) = request.passport_expiry {
            active.passport_expiry = Set(passport_expiry);
        }
        if let Some(visa_expiry) = request.visa_expiry {
            active.visa_expiry = Set(visa_expiry);
        }
        if let Some(insurance_expiry) = request.insurance_expiry {
            active.insurance_expiry = Set(insurance_expiry);
        }
        if let Some(salary) = request.salary {
            active.salary = Set(salary);
        }
        if let Some(emergency_contact) = request.emergency_contact {
            active.emergency_contact = Set(emergency_contact);
        }
        if let Some(contact_number) = request.contact_number {
            active.contact_number = Set(contact_number);
        }
        if let Some(home_address) = request.home_address {
            active.home_address = Set(home_address);
        }
        if let Some(uae_address) = request.uae_address {
            active.uae_address = Set(uae_address);
        }

        let updated = active.update(&*self.db).await?;
        self.persist_visa_status(updated).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_visa_details(
        &self,
        kind: StaffKind,
        staff_id: &str,
        request: UpdateVisaDetailsRequest,
    ) -> Result<staff::Model, ServiceError> {
        let record = find_for_kind(&*self.db, staff_id, kind).await?;

        let mut active: staff::ActiveModel = record.into();
        if let Some(visa_no) = request.visa_no {
            active.visa_no = Set(visa_no);
        }
        if let Some(visa_expiry) = request.visa_expiry {
            active.visa_expiry = Set(visa_expiry);
        }
        if let Some(emirates_id_number) = request.emirates_id_number {
            active.emirates_id_number = Set(emirates_id_number);
        }
        if let Some(emergency_contact) = request.emergency_contact {
            active.emergency_contact = Set(emergency_contact);
        }
        if let Some(uae_address) = request.uae_address {
            active.uae_address = Set(uae_address);
        }

        let updated = active.update(&*self.db).await?;
        self.persist_visa_status(updated).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, kind: StaffKind, staff_id: &str) -> Result<(), ServiceError> {
        let record = find_for_kind(&*self.db, staff_id, kind).await?;
        if let Some(photo) = &record.profile_photo {
            self.media.delete(photo).await;
        }
        if let Some(letter) = &record.offer_letter {
            self.media.delete(letter).await;
        }
        record.delete(&*self.db).await?;
        Ok(())
    }

    /// Stores an uploaded profile photo, replacing any previous file.
    #[instrument(skip(self, bytes))]
    pub async fn attach_photo(
        &self,
        kind: StaffKind,
        staff_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<staff::Model, ServiceError> {
        let record = find_for_kind(&*self.db, staff_id, kind).await?;
        if let Some(previous) = &record.profile_photo {
            self.media.delete(previous).await;
        }
        let stored = self
            .media
            .save(crate::storage::STAFF_PHOTOS, filename, bytes)
            .await?;
        let mut active: staff::ActiveModel = record.into();
        active.profile_photo = Set(Some(stored));
        Ok(active.update(&*self.db).await?)
    }

    /// Stores an uploaded offer letter; PDFs only.
    #[instrument(skip(self, bytes))]
    pub async fn attach_offer_letter(
        &self,
        kind: StaffKind,
        staff_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<staff::Model, ServiceError> {
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ServiceError::field("offer_letter", "File must be a PDF."));
        }
        let record = find_for_kind(&*self.db, staff_id, kind).await?;
        if let Some(previous) = &record.offer_letter {
            self.media.delete(previous).await;
        }
        let stored = self
            .media
            .save(crate::storage::OFFER_LETTERS, filename, bytes)
            .await?;
        let mut active: staff::ActiveModel = record.into();
        active.offer_letter = Set(Some(stored));
        Ok(active.update(&*self.db).await?)
    }

    /// Next `S<n>`/`M<n>` display id for the kind.
    async fn next_staff_id(&self, kind: StaffKind) -> Result<String, ServiceError> {
        let prefix = kind.id_prefix();
        let existing = StaffEntity::find()
            .filter(staff::Column::Kind.eq(kind))
            .all(&*self.db)
            .await?;
        let last = existing
            .iter()
            .filter_map(|record| record.staff_id.strip_prefix(prefix)?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Ok(format!("{prefix}{}", last + 1))
    }

    /// Writes the freshly derived visa status back when it drifted.
    async fn persist_visa_status(&self, record: staff::Model) -> Result<staff::Model, ServiceError> {
        let today = Utc::now().date_naive();
        let derived = workflow::derive_visa_status(record.visa_expiry, today, record.visa_status);
        if derived == record.visa_status {
            return Ok(record);
        }
        let mut active: staff::ActiveModel = record.into();
        active.visa_status = Set(derived);
        Ok(active.update(&*self.db).await?)
    }
}

/// Non-persisting variant used for list responses.
fn refresh_visa_status(mut record: staff::Model) -> staff::Model {
    let today = Utc::now().date_naive();
    record.visa_status = workflow::derive_visa_status(record.visa_expiry, today, record.visa_status);
    record
}
