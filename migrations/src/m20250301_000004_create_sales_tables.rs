use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250301_000004_create_sales_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::CompanyName).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::ContactName).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::CompanyEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::ContactEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::CompanyNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Contacts::ContactNumber).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Contacts::LicenseNumber)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contacts::LicenseExpiryDate).date().not_null())
                    .col(ColumnDef::new(Contacts::TirnNumber).string_len(100).not_null())
                    .col(ColumnDef::new(Contacts::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Contacts::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contacts::LicenseFile).string_len(512).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inquiries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiries::CompanyName).string_len(255).not_null())
                    .col(ColumnDef::new(Inquiries::ContactName).string_len(255).not_null())
                    .col(ColumnDef::new(Inquiries::ContactNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Inquiries::Status).string_len(10).not_null())
                    .col(ColumnDef::new(Inquiries::Inquiry).text().not_null())
                    .col(ColumnDef::new(Inquiries::AssignTo).uuid().null())
                    .col(
                        ColumnDef::new(Inquiries::AssignToUsername)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inquiries::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Inquiries::Year).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_year")
                    .table(Inquiries::Table)
                    .col(Inquiries::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Quotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quotes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quotes::Year).integer().not_null())
                    .col(ColumnDef::new(Quotes::QuoteTitle).string_len(255).not_null())
                    .col(ColumnDef::new(Quotes::CompanyName).string_len(255).not_null())
                    .col(ColumnDef::new(Quotes::ContactName).string_len(255).not_null())
                    .col(ColumnDef::new(Quotes::ContactNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Quotes::ContactEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Quotes::CompanyEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Quotes::Status).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Quotes::QuoteNo)
                            .string_len(5)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Quotes::VatApplicable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Quotes::VatPercentage).double().not_null())
                    .col(ColumnDef::new(Quotes::Subtotal).double().not_null())
                    .col(ColumnDef::new(Quotes::VatAmount).double().not_null())
                    .col(ColumnDef::new(Quotes::GrandTotal).double().not_null())
                    .col(ColumnDef::new(Quotes::NotesRemarks).text().not_null())
                    .col(ColumnDef::new(Quotes::AssignTo).uuid().null())
                    .col(ColumnDef::new(Quotes::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Quotes::CreateDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Quotes::InvoicePdf).string_len(512).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuoteProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuoteProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuoteProducts::QuoteId).integer().not_null())
                    .col(ColumnDef::new(QuoteProducts::Product).string_len(255).not_null())
                    .col(ColumnDef::new(QuoteProducts::Specification).text().not_null())
                    .col(ColumnDef::new(QuoteProducts::Qty).integer().not_null())
                    .col(ColumnDef::new(QuoteProducts::UnitPrice).double().not_null())
                    .col(ColumnDef::new(QuoteProducts::TotalPrice).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_products_quote")
                            .from(QuoteProducts::Table, QuoteProducts::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OutgoingMails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OutgoingMails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OutgoingMails::CompanyName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OutgoingMails::ContactName).string_len(255).null())
                    .col(
                        ColumnDef::new(OutgoingMails::ContactNumber)
                            .string_len(20)
                            .null(),
                    )
                    .col(ColumnDef::new(OutgoingMails::Status).string_len(10).not_null())
                    .col(ColumnDef::new(OutgoingMails::Message).text().not_null())
                    .col(
                        ColumnDef::new(OutgoingMails::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OutgoingMails::Year).integer().not_null())
                    .col(ColumnDef::new(OutgoingMails::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(OutgoingMails::CompanyEmail)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OutgoingMails::ContactEmail)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OutgoingMails::MailSubject)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OutgoingMails::QuoteNo).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalesOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalesOrders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::OrderNo)
                            .string_len(5)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SalesOrders::Year).integer().not_null())
                    .col(
                        ColumnDef::new(SalesOrders::CompanyName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::ContactName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::ContactNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::ContactEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::CompanyEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalesOrders::QuoteNo).string_len(5).null())
                    .col(ColumnDef::new(SalesOrders::Status).string_len(10).not_null())
                    .col(
                        ColumnDef::new(SalesOrders::AccountsStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::GmStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::MgmtStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrders::VatApplicable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SalesOrders::VatPercentage).double().not_null())
                    .col(ColumnDef::new(SalesOrders::Subtotal).double().not_null())
                    .col(ColumnDef::new(SalesOrders::VatAmount).double().not_null())
                    .col(ColumnDef::new(SalesOrders::GrandTotal).double().not_null())
                    .col(ColumnDef::new(SalesOrders::NotesRemarks).text().not_null())
                    .col(ColumnDef::new(SalesOrders::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(SalesOrders::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalesOrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalesOrderItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SalesOrderItems::SalesOrderId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalesOrderItems::Product)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalesOrderItems::Specification).text().not_null())
                    .col(ColumnDef::new(SalesOrderItems::Qty).integer().not_null())
                    .col(ColumnDef::new(SalesOrderItems::UnitPrice).double().not_null())
                    .col(ColumnDef::new(SalesOrderItems::TotalPrice).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_order_items_order")
                            .from(SalesOrderItems::Table, SalesOrderItems::SalesOrderId)
                            .to(SalesOrders::Table, SalesOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobCards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JobCards::JobCardNo)
                            .string_len(5)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(JobCards::SalesOrderId).integer().null())
                    .col(ColumnDef::new(JobCards::CompanyName).string_len(255).not_null())
                    .col(ColumnDef::new(JobCards::WorkDescription).text().not_null())
                    .col(ColumnDef::new(JobCards::AssignedTo).string_len(255).not_null())
                    .col(ColumnDef::new(JobCards::Status).string_len(20).not_null())
                    .col(ColumnDef::new(JobCards::StartDate).date().null())
                    .col(ColumnDef::new(JobCards::CompletionDate).date().null())
                    .col(ColumnDef::new(JobCards::Remarks).text().not_null())
                    .col(ColumnDef::new(JobCards::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(JobCards::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_cards_sales_order")
                            .from(JobCards::Table, JobCards::SalesOrderId)
                            .to(SalesOrders::Table, SalesOrders::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalesOrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OutgoingMails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuoteProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    CompanyName,
    ContactName,
    CompanyEmail,
    ContactEmail,
    CompanyNumber,
    ContactNumber,
    LicenseNumber,
    LicenseExpiryDate,
    TirnNumber,
    CreatedBy,
    CreatedOn,
    LicenseFile,
}

#[derive(Iden)]
enum Inquiries {
    Table,
    Id,
    CompanyName,
    ContactName,
    ContactNumber,
    Status,
    Inquiry,
    AssignTo,
    AssignToUsername,
    CreatedOn,
    Year,
}

#[derive(Iden)]
enum Quotes {
    Table,
    Id,
    Year,
    QuoteTitle,
    CompanyName,
    ContactName,
    ContactNumber,
    ContactEmail,
    CompanyEmail,
    Status,
    QuoteNo,
    VatApplicable,
    VatPercentage,
    Subtotal,
    VatAmount,
    GrandTotal,
    NotesRemarks,
    AssignTo,
    CreatedBy,
    CreateDate,
    InvoicePdf,
}

#[derive(Iden)]
enum QuoteProducts {
    Table,
    Id,
    QuoteId,
    Product,
    Specification,
    Qty,
    UnitPrice,
    TotalPrice,
}

#[derive(Iden)]
enum OutgoingMails {
    Table,
    Id,
    CompanyName,
    ContactName,
    ContactNumber,
    Status,
    Message,
    CreatedOn,
    Year,
    CreatedBy,
    CompanyEmail,
    ContactEmail,
    MailSubject,
    QuoteNo,
}

#[derive(Iden)]
enum SalesOrders {
    Table,
    Id,
    OrderNo,
    Year,
    CompanyName,
    ContactName,
    ContactNumber,
    ContactEmail,
    CompanyEmail,
    QuoteNo,
    Status,
    AccountsStatus,
    GmStatus,
    MgmtStatus,
    VatApplicable,
    VatPercentage,
    Subtotal,
    VatAmount,
    GrandTotal,
    NotesRemarks,
    CreatedBy,
    CreatedOn,
}

#[derive(Iden)]
enum SalesOrderItems {
    Table,
    Id,
    SalesOrderId,
    Product,
    Specification,
    Qty,
    UnitPrice,
    TotalPrice,
}

#[derive(Iden)]
enum JobCards {
    Table,
    Id,
    JobCardNo,
    SalesOrderId,
    CompanyName,
    WorkDescription,
    AssignedTo,
    Status,
    StartDate,
    CompletionDate,
    Remarks,
    CreatedBy,
    CreatedOn,
}
