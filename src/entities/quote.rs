use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::SalesStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    pub quote_title: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_number: String,
    pub contact_email: String,
    pub company_email: String,
    pub status: SalesStatus,
    #[sea_orm(unique)]
    pub quote_no: String,
    pub vat_applicable: bool,
    pub vat_percentage: f64,
    pub subtotal: f64,
    pub vat_amount: f64,
    pub grand_total: f64,
    #[sea_orm(column_type = "Text")]
    pub notes_remarks: String,
    pub assign_to: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub create_date: DateTimeWithTimeZone,
    /// Stored path of the generated invoice, relative to the media root.
    pub invoice_pdf: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quote_product::Entity")]
    Products,
}

impl Related<super::quote_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
