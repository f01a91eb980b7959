use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{ProductCondition, ProductKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Random 5-digit display key.
    #[sea_orm(unique)]
    pub product_id: String,
    pub kind: ProductKind,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub product_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(unique)]
    pub part_no: String,
    pub storage_location: String,
    #[sea_orm(column_type = "Text")]
    pub remarks: String,
    /// Required for imported products, absent for local ones.
    pub origin: Option<String>,
    pub measurement_unit: String,
    /// Invariant: never negative after any mutation.
    pub stock_count: i32,
    /// Invariant: never negative after any mutation.
    pub quantity_added: i32,
    pub condition: ProductCondition,
    pub added_by: Option<Uuid>,
    pub added_on: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::subcategory::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategory::Column::Id"
    )]
    Subcategory,
    #[sea_orm(has_many = "super::stock_history::Entity")]
    StockHistory,
    #[sea_orm(has_many = "super::removal_request_item::Entity")]
    RemovalRequestItems,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::subcategory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl Related<super::stock_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockHistory.def()
    }
}

impl Related<super::removal_request_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RemovalRequestItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
