use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{StaffKind, VisaStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display key, `S<n>` or `M<n>` depending on kind.
    #[sea_orm(unique)]
    pub staff_id: String,
    pub kind: StaffKind,
    pub name: String,
    #[sea_orm(unique)]
    pub passport_no: String,
    #[sea_orm(unique)]
    pub visa_no: String,
    #[sea_orm(unique)]
    pub emirates_id_number: String,
    pub designation: String,
    pub nationality: String,
    #[sea_orm(unique)]
    pub insurance_number: String,
    #[sea_orm(unique)]
    pub email: String,
    pub passport_expiry: Date,
    pub visa_expiry: Date,
    pub insurance_expiry: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub salary: Decimal,
    pub emergency_contact: String,
    pub contact_number: String,
    pub profile_photo: Option<String>,
    pub offer_letter: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub home_address: String,
    #[sea_orm(column_type = "Text")]
    pub uae_address: String,
    pub joining_date: Date,
    /// Last derived value; recomputed on every read and save.
    pub visa_status: VisaStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_many = "super::leave_request::Entity")]
    LeaveRequests,
    #[sea_orm(has_many = "super::loan::Entity")]
    Loans,
    #[sea_orm(has_many = "super::overtime::Entity")]
    Overtime,
    #[sea_orm(has_many = "super::fine::Entity")]
    Fines,
    #[sea_orm(has_many = "super::appraisal::Entity")]
    Appraisals,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequests.def()
    }
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

impl Related<super::overtime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Overtime.def()
    }
}

impl Related<super::fine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fines.def()
    }
}

impl Related<super::appraisal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appraisals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
