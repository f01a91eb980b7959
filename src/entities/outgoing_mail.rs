use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::MailStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outgoing_mails")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_number: Option<String>,
    pub status: MailStatus,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created_on: DateTimeWithTimeZone,
    pub year: i32,
    pub created_by: Uuid,
    pub company_email: Option<String>,
    pub contact_email: Option<String>,
    pub mail_subject: String,
    pub quote_no: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
