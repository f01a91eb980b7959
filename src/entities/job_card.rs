use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::JobCardStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub job_card_no: String,
    pub sales_order_id: Option<i32>,
    pub company_name: String,
    #[sea_orm(column_type = "Text")]
    pub work_description: String,
    pub assigned_to: String,
    pub status: JobCardStatus,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub remarks: String,
    pub created_by: Option<Uuid>,
    pub created_on: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_order::Entity",
        from = "Column::SalesOrderId",
        to = "super::sales_order::Column::Id"
    )]
    SalesOrder,
}

impl Related<super::sales_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
