use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250301_000002_create_hr_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::StaffId)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Staff::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Staff::PassportNo)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::VisaNo)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::EmiratesIdNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::Designation).string_len(100).not_null())
                    .col(ColumnDef::new(Staff::Nationality).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Staff::InsuranceNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::PassportExpiry).date().not_null())
                    .col(ColumnDef::new(Staff::VisaExpiry).date().not_null())
                    .col(ColumnDef::new(Staff::InsuranceExpiry).date().not_null())
                    .col(ColumnDef::new(Staff::Salary).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Staff::EmergencyContact)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Staff::ContactNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Staff::ProfilePhoto).string_len(512).null())
                    .col(ColumnDef::new(Staff::OfferLetter).string_len(512).null())
                    .col(ColumnDef::new(Staff::HomeAddress).text().not_null())
                    .col(ColumnDef::new(Staff::UaeAddress).text().not_null())
                    .col(ColumnDef::new(Staff::JoiningDate).date().not_null())
                    .col(ColumnDef::new(Staff::VisaStatus).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StaffId).integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Attendance::Reason).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_staff")
                            .from(Attendance::Table, Attendance::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_attendance_staff_date")
                    .table(Attendance::Table)
                    .col(Attendance::StaffId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeaveRequests::StaffId).integer().not_null())
                    .col(
                        ColumnDef::new(LeaveRequests::StaffName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::FromDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::ToDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).text().not_null())
                    .col(
                        ColumnDef::new(LeaveRequests::SubmittedBy)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(LeaveRequests::GmStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::MgmtStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::RequestDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_staff")
                            .from(LeaveRequests::Table, LeaveRequests::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LeaveComments::LeaveRequestId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(LeaveComments::Commenter)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveComments::CommentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_comments_request")
                            .from(LeaveComments::Table, LeaveComments::LeaveRequestId)
                            .to(LeaveRequests::Table, LeaveRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Loans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Loans::StaffId).integer().not_null())
                    .col(ColumnDef::new(Loans::StaffName).string_len(100).not_null())
                    .col(ColumnDef::new(Loans::FromDate).date().not_null())
                    .col(ColumnDef::new(Loans::ToDate).date().not_null())
                    .col(ColumnDef::new(Loans::Reason).text().not_null())
                    .col(ColumnDef::new(Loans::SubmittedBy).string_len(100).not_null())
                    .col(ColumnDef::new(Loans::LoanStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Loans::GmStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Loans::MgmtStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Loans::RequestDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loans_staff")
                            .from(Loans::Table, Loans::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LoanComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoanComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LoanComments::LoanId).integer().not_null())
                    .col(ColumnDef::new(LoanComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(LoanComments::Commenter)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanComments::CommentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_comments_loan")
                            .from(LoanComments::Table, LoanComments::LoanId)
                            .to(Loans::Table, Loans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Overtime::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Overtime::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Overtime::StaffId).integer().not_null())
                    .col(ColumnDef::new(Overtime::StaffName).string_len(100).not_null())
                    .col(ColumnDef::new(Overtime::OtDate).date().not_null())
                    .col(ColumnDef::new(Overtime::OtStartTime).time().not_null())
                    .col(ColumnDef::new(Overtime::OtEndTime).time().not_null())
                    .col(ColumnDef::new(Overtime::Duration).double().not_null())
                    .col(ColumnDef::new(Overtime::Reason).text().not_null())
                    .col(ColumnDef::new(Overtime::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Overtime::GmStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Overtime::MgmtStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Overtime::RequestDate).date().not_null())
                    .col(
                        ColumnDef::new(Overtime::SubmittedBy)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_overtime_staff")
                            .from(Overtime::Table, Overtime::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OvertimeComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OvertimeComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OvertimeComments::OvertimeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OvertimeComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(OvertimeComments::Commenter)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OvertimeComments::CommentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_overtime_comments_overtime")
                            .from(OvertimeComments::Table, OvertimeComments::OvertimeId)
                            .to(Overtime::Table, Overtime::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Fines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Fines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Fines::StaffId).integer().not_null())
                    .col(ColumnDef::new(Fines::StaffName).string_len(100).not_null())
                    .col(ColumnDef::new(Fines::FineAmount).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Fines::Reason).text().not_null())
                    .col(ColumnDef::new(Fines::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Fines::GmStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Fines::MgmtStatus).string_len(20).not_null())
                    .col(ColumnDef::new(Fines::RequestDate).date().not_null())
                    .col(ColumnDef::new(Fines::SubmittedBy).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fines_staff")
                            .from(Fines::Table, Fines::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FineComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FineComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FineComments::FineId).integer().not_null())
                    .col(ColumnDef::new(FineComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(FineComments::Commenter)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FineComments::CommentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fine_comments_fine")
                            .from(FineComments::Table, FineComments::FineId)
                            .to(Fines::Table, Fines::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appraisals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appraisals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appraisals::StaffId).integer().not_null())
                    .col(
                        ColumnDef::new(Appraisals::StaffName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appraisals::AppraisalAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appraisals::Reason).text().not_null())
                    .col(ColumnDef::new(Appraisals::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Appraisals::GmStatus).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Appraisals::MgmtStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appraisals::RequestDate).date().not_null())
                    .col(
                        ColumnDef::new(Appraisals::SubmittedBy)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appraisals_staff")
                            .from(Appraisals::Table, Appraisals::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AppraisalComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppraisalComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppraisalComments::AppraisalId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppraisalComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(AppraisalComments::Commenter)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppraisalComments::CommentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appraisal_comments_appraisal")
                            .from(AppraisalComments::Table, AppraisalComments::AppraisalId)
                            .to(Appraisals::Table, Appraisals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppraisalComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appraisals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FineComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Fines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OvertimeComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Overtime::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LoanComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Loans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    StaffId,
    Kind,
    Name,
    PassportNo,
    VisaNo,
    EmiratesIdNumber,
    Designation,
    Nationality,
    InsuranceNumber,
    Email,
    PassportExpiry,
    VisaExpiry,
    InsuranceExpiry,
    Salary,
    EmergencyContact,
    ContactNumber,
    ProfilePhoto,
    OfferLetter,
    HomeAddress,
    UaeAddress,
    JoiningDate,
    VisaStatus,
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    StaffId,
    Date,
    Status,
    Reason,
}

#[derive(Iden)]
enum LeaveRequests {
    Table,
    Id,
    StaffId,
    StaffName,
    FromDate,
    ToDate,
    Reason,
    SubmittedBy,
    Status,
    GmStatus,
    MgmtStatus,
    RequestDate,
}

#[derive(Iden)]
enum LeaveComments {
    Table,
    Id,
    LeaveRequestId,
    Comment,
    Commenter,
    CommentDate,
}

#[derive(Iden)]
enum Loans {
    Table,
    Id,
    StaffId,
    StaffName,
    FromDate,
    ToDate,
    Reason,
    SubmittedBy,
    LoanStatus,
    GmStatus,
    MgmtStatus,
    RequestDate,
}

#[derive(Iden)]
enum LoanComments {
    Table,
    Id,
    LoanId,
    Comment,
    Commenter,
    CommentDate,
}

#[derive(Iden)]
enum Overtime {
    Table,
    Id,
    StaffId,
    StaffName,
    OtDate,
    OtStartTime,
    OtEndTime,
    Duration,
    Reason,
    Status,
    GmStatus,
    MgmtStatus,
    RequestDate,
    SubmittedBy,
}

#[derive(Iden)]
enum OvertimeComments {
    Table,
    Id,
    OvertimeId,
    Comment,
    Commenter,
    CommentDate,
}

#[derive(Iden)]
enum Fines {
    Table,
    Id,
    StaffId,
    StaffName,
    FineAmount,
    Reason,
    Status,
    GmStatus,
    MgmtStatus,
    RequestDate,
    SubmittedBy,
}

#[derive(Iden)]
enum FineComments {
    Table,
    Id,
    FineId,
    Comment,
    Commenter,
    CommentDate,
}

#[derive(Iden)]
enum Appraisals {
    Table,
    Id,
    StaffId,
    StaffName,
    AppraisalAmount,
    Reason,
    Status,
    GmStatus,
    MgmtStatus,
    RequestDate,
    SubmittedBy,
}

#[derive(Iden)]
enum AppraisalComments {
    Table,
    Id,
    AppraisalId,
    Comment,
    Commenter,
    CommentDate,
}
