use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::StudentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Student::Regno)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Student::Rno)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::Name).string().not_null())
                    .col(ColumnDef::new(Student::Bdate).string_len(32).not_null())
                    .col(ColumnDef::new(Student::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(Student::Email).string().not_null())
                    .col(ColumnDef::new(Student::Nationality).string().not_null())
                    .col(ColumnDef::new(Student::Department).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faculty::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Faculty::FacultyId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Faculty::FacultyCode)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Faculty::Name).string().not_null())
                    .col(ColumnDef::new(Faculty::Department).string().not_null())
                    .col(
                        ColumnDef::new(Faculty::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Faculty::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(Faculty::Designation).string().not_null())
                    .col(ColumnDef::new(Faculty::Password).string().not_null())
                    .col(
                        ColumnDef::new(Faculty::Role)
                            .string_len(16)
                            .not_null()
                            .default("faculty"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_faculty_department")
                    .table(Faculty::Table)
                    .col(Faculty::Department)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_faculty_department")
                    .table(Faculty::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Faculty::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
    Regno,
    Rno,
    Name,
    Bdate,
    Phone,
    Email,
    Nationality,
    Department,
}

#[derive(DeriveIden)]
enum Faculty {
    Table,
    FacultyId,
    FacultyCode,
    Name,
    Department,
    Email,
    Phone,
    Designation,
    Password,
    Role,
}
