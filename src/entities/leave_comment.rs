use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub leave_request_id: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub commenter: String,
    pub comment_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leave_request::Entity",
        from = "Column::LeaveRequestId",
        to = "super::leave_request::Column::Id"
    )]
    LeaveRequest,
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
