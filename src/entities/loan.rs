use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{LoanStatus, ReviewStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub staff_id: i32,
    pub staff_name: String,
    /// Borrowing date.
    pub from_date: Date,
    /// Return date.
    pub to_date: Date,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub submitted_by: String,
    pub loan_status: LoanStatus,
    pub gm_status: ReviewStatus,
    pub mgmt_status: ReviewStatus,
    pub request_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id"
    )]
    Staff,
    #[sea_orm(has_many = "super::loan_comment::Entity")]
    Comments,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::loan_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
