use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fine_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fine_id: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub commenter: String,
    pub comment_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fine::Entity",
        from = "Column::FineId",
        to = "super::fine::Column::Id"
    )]
    Fine,
}

impl Related<super::fine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
