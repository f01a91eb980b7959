use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{DecisionStatus, ReviewStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "overtime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub staff_id: i32,
    pub staff_name: String,
    pub ot_date: Date,
    pub ot_start_time: Time,
    pub ot_end_time: Time,
    /// Hours, computed from the time span; an end before start rolls over
    /// to the next day.
    pub duration: f64,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub status: DecisionStatus,
    pub gm_status: ReviewStatus,
    pub mgmt_status: ReviewStatus,
    pub request_date: Date,
    pub submitted_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id"
    )]
    Staff,
    #[sea_orm(has_many = "super::overtime_comment::Entity")]
    Comments,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::overtime_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
