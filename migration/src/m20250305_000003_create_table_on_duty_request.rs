use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OnDutyRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OnDutyRequest::RequestId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OnDutyRequest::StudentId).uuid().not_null())
                    .col(ColumnDef::new(OnDutyRequest::StudentName).string().not_null())
                    .col(
                        ColumnDef::new(OnDutyRequest::RegistrationNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OnDutyRequest::Department).string().not_null())
                    .col(ColumnDef::new(OnDutyRequest::Reason).string_len(32).not_null())
                    .col(ColumnDef::new(OnDutyRequest::EventName).string().not_null())
                    .col(ColumnDef::new(OnDutyRequest::FromDate).date().not_null())
                    .col(ColumnDef::new(OnDutyRequest::ToDate).date().not_null())
                    .col(ColumnDef::new(OnDutyRequest::FromTime).time().not_null())
                    .col(ColumnDef::new(OnDutyRequest::ToTime).time().not_null())
                    .col(ColumnDef::new(OnDutyRequest::Description).text().not_null())
                    .col(ColumnDef::new(OnDutyRequest::AttachmentUrl).string().null())
                    .col(
                        ColumnDef::new(OnDutyRequest::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(OnDutyRequest::ResolvedBy).uuid().null())
                    .col(ColumnDef::new(OnDutyRequest::ResolvedByName).string().null())
                    .col(ColumnDef::new(OnDutyRequest::ResolvedAt).timestamp().null())
                    .col(ColumnDef::new(OnDutyRequest::SubmittedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_on_duty_request_student")
                            .from_tbl(OnDutyRequest::Table)
                            .from_col(OnDutyRequest::StudentId)
                            .to_tbl(Student::Table)
                            .to_col(Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_on_duty_request_student_id")
                    .table(OnDutyRequest::Table)
                    .col(OnDutyRequest::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_on_duty_request_department")
                    .table(OnDutyRequest::Table)
                    .col(OnDutyRequest::Department)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_on_duty_request_department")
                    .table(OnDutyRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_on_duty_request_student_id")
                    .table(OnDutyRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OnDutyRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum OnDutyRequest {
    Table,
    RequestId,
    StudentId,
    StudentName,
    RegistrationNumber,
    Department,
    Reason,
    EventName,
    FromDate,
    ToDate,
    FromTime,
    ToTime,
    Description,
    AttachmentUrl,
    Status,
    ResolvedBy,
    ResolvedByName,
    ResolvedAt,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
}
