use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificate::CertificateId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificate::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Certificate::Title).string().not_null())
                    .col(ColumnDef::new(Certificate::EventName).string().not_null())
                    .col(ColumnDef::new(Certificate::IssueDate).date().not_null())
                    .col(
                        ColumnDef::new(Certificate::CertificateType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Certificate::StudentName).string().not_null())
                    .col(ColumnDef::new(Certificate::Email).string().not_null())
                    .col(ColumnDef::new(Certificate::Department).string().not_null())
                    .col(
                        ColumnDef::new(Certificate::RegistrationNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Certificate::ArtifactPath).string().not_null())
                    .col(ColumnDef::new(Certificate::IssuedBy).uuid().not_null())
                    .col(ColumnDef::new(Certificate::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificate_student")
                            .from_tbl(Certificate::Table)
                            .from_col(Certificate::StudentId)
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
                    .name("idx_certificate_student_id")
                    .table(Certificate::Table)
                    .col(Certificate::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_certificate_student_id")
                    .table(Certificate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Certificate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Certificate {
    Table,
    CertificateId,
    StudentId,
    Title,
    EventName,
    IssueDate,
    CertificateType,
    StudentName,
    Email,
    Department,
    RegistrationNumber,
    ArtifactPath,
    IssuedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
}
