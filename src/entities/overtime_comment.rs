use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "overtime_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub overtime_id: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub commenter: String,
    pub comment_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::overtime::Entity",
        from = "Column::OvertimeId",
        to = "super::overtime::Column::Id"
    )]
    Overtime,
}

impl Related<super::overtime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Overtime.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
