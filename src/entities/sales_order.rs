use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{ApprovalStatus, SalesStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_no: String,
    pub year: i32,
    pub company_name: String,
    pub contact_name: String,
    pub contact_number: String,
    pub contact_email: String,
    pub company_email: String,
    /// Back-reference to the quote this order was raised from, if any.
    pub quote_no: Option<String>,
    pub status: SalesStatus,
    pub accounts_status: ApprovalStatus,
    pub gm_status: ApprovalStatus,
    pub mgmt_status: ApprovalStatus,
    pub vat_applicable: bool,
    pub vat_percentage: f64,
    pub subtotal: f64,
    pub vat_amount: f64,
    pub grand_total: f64,
    #[sea_orm(column_type = "Text")]
    pub notes_remarks: String,
    pub created_by: Option<Uuid>,
    pub created_on: DateTimeWithTimeZone,
}

impl Model {
    pub fn fully_approved(&self) -> bool {
        crate::workflow::fully_approved(&[self.accounts_status, self.gm_status, self.mgmt_status])
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_order_item::Entity")]
    Items,
    #[sea_orm(has_many = "super::job_card::Entity")]
    JobCards,
}

impl Related<super::sales_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::job_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
