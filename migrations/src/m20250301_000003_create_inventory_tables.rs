use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250301_000003_create_inventory_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subcategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subcategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subcategories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Subcategories::CategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Subcategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subcategories_category")
                            .from(Subcategories::Table, Subcategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_subcategories_name_category")
                    .table(Subcategories::Table)
                    .col(Subcategories::Name)
                    .col(Subcategories::CategoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Products::ProductId)
                            .string_len(5)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::Kind).string_len(10).not_null())
                    .col(ColumnDef::new(Products::CategoryId).integer().null())
                    .col(ColumnDef::new(Products::SubcategoryId).integer().null())
                    .col(ColumnDef::new(Products::ProductName).string_len(200).not_null())
                    .col(ColumnDef::new(Products::Description).text().not_null())
                    .col(
                        ColumnDef::new(Products::PartNo)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Products::StorageLocation)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::Remarks).text().not_null())
                    .col(ColumnDef::new(Products::Origin).string_len(100).null())
                    .col(
                        ColumnDef::new(Products::MeasurementUnit)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::StockCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::QuantityAdded)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Products::Condition).string_len(20).not_null())
                    .col(ColumnDef::new(Products::AddedBy).uuid().null())
                    .col(
                        ColumnDef::new(Products::AddedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_subcategory")
                            .from(Products::Table, Products::SubcategoryId)
                            .to(Subcategories::Table, Subcategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_kind")
                    .table(Products::Table)
                    .col(Products::Kind)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockHistory::ProductId).integer().not_null())
                    .col(ColumnDef::new(StockHistory::QuantityAdded).integer().not_null())
                    .col(ColumnDef::new(StockHistory::AddedBy).uuid().null())
                    .col(
                        ColumnDef::new(StockHistory::AddedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockHistory::Remarks).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_history_product")
                            .from(StockHistory::Table, StockHistory::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RemovalRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RemovalRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RemovalRequests::RequestNo)
                            .string_len(5)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RemovalRequests::Kind).string_len(10).not_null())
                    .col(
                        ColumnDef::new(RemovalRequests::RemovalReason)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RemovalRequests::Remarks).text().not_null())
                    .col(
                        ColumnDef::new(RemovalRequests::AccountsStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RemovalRequests::GmStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RemovalRequests::MgmtStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RemovalRequests::RequestedBy).uuid().null())
                    .col(
                        ColumnDef::new(RemovalRequests::CreatedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RemovalRequests::GmRemarks).text().not_null())
                    .col(ColumnDef::new(RemovalRequests::MgmtRemarks).text().not_null())
                    .col(
                        ColumnDef::new(RemovalRequests::StockDeducted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RemovalRequestItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RemovalRequestItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RemovalRequestItems::RequestId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RemovalRequestItems::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RemovalRequestItems::Quantity)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_removal_request_items_request")
                            .from(RemovalRequestItems::Table, RemovalRequestItems::RequestId)
                            .to(RemovalRequests::Table, RemovalRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_removal_request_items_product")
                            .from(RemovalRequestItems::Table, RemovalRequestItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RemovalRequestItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RemovalRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subcategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Subcategories {
    Table,
    Id,
    Name,
    CategoryId,
    CreatedAt,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    ProductId,
    Kind,
    CategoryId,
    SubcategoryId,
    ProductName,
    Description,
    PartNo,
    StorageLocation,
    Remarks,
    Origin,
    MeasurementUnit,
    StockCount,
    QuantityAdded,
    Condition,
    AddedBy,
    AddedOn,
}

#[derive(Iden)]
enum StockHistory {
    Table,
    Id,
    ProductId,
    QuantityAdded,
    AddedBy,
    AddedOn,
    Remarks,
}

#[derive(Iden)]
enum RemovalRequests {
    Table,
    Id,
    RequestNo,
    Kind,
    RemovalReason,
    Remarks,
    AccountsStatus,
    GmStatus,
    MgmtStatus,
    RequestedBy,
    CreatedDate,
    GmRemarks,
    MgmtRemarks,
    StockDeducted,
}

#[derive(Iden)]
enum RemovalRequestItems {
    Table,
    Id,
    RequestId,
    ProductId,
    Quantity,
}
