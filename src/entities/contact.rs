use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_name: String,
    pub company_email: String,
    pub contact_email: String,
    pub company_number: String,
    pub contact_number: String,
    pub license_number: String,
    pub license_expiry_date: Date,
    pub tirn_number: String,
    pub created_by: Uuid,
    pub created_on: DateTimeWithTimeZone,
    /// Stored path of the uploaded trade license, relative to the media root.
    pub license_file: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
