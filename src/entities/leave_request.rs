use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{LeaveStatus, ReviewStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub staff_id: i32,
    /// Denormalized copy of the staff member's display name.
    pub staff_name: String,
    pub from_date: Date,
    pub to_date: Date,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub submitted_by: String,
    pub status: LeaveStatus,
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
    #[sea_orm(has_many = "super::leave_comment::Entity")]
    Comments,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::leave_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
