use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::SalesStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_name: String,
    pub contact_number: String,
    pub status: SalesStatus,
    #[sea_orm(column_type = "Text")]
    pub inquiry: String,
    pub assign_to: Option<Uuid>,
    pub assign_to_username: String,
    pub created_on: DateTimeWithTimeZone,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
