use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{ApprovalStatus, ProductKind, RemovalReason};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "removal_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Random 5-digit display key.
    #[sea_orm(unique)]
    pub request_no: String,
    pub kind: ProductKind,
    pub removal_reason: RemovalReason,
    #[sea_orm(column_type = "Text")]
    pub remarks: String,
    pub accounts_status: ApprovalStatus,
    pub gm_status: ApprovalStatus,
    pub mgmt_status: ApprovalStatus,
    pub requested_by: Option<Uuid>,
    pub created_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text")]
    pub gm_remarks: String,
    #[sea_orm(column_type = "Text")]
    pub mgmt_remarks: String,
    /// Transitions false -> true at most once, inside the deduction
    /// transaction.
    pub stock_deducted: bool,
}

impl Model {
    /// True when every approver role has signed off.
    pub fn fully_approved(&self) -> bool {
        crate::workflow::fully_approved(&[self.accounts_status, self.gm_status, self.mgmt_status])
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::removal_request_item::Entity")]
    Items,
}

impl Related<super::removal_request_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
