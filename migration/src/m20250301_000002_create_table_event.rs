use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Event::EventId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Event::Title).string().not_null())
                    .col(ColumnDef::new(Event::Description).text().not_null())
                    .col(ColumnDef::new(Event::Date).string_len(64).not_null())
                    .col(ColumnDef::new(Event::Time).string_len(64).not_null())
                    .col(ColumnDef::new(Event::Venue).string().not_null())
                    .col(ColumnDef::new(Event::Organizer).string().not_null())
                    .col(
                        ColumnDef::new(Event::Category)
                            .string_len(16)
                            .not_null()
                            .default("technical"),
                    )
                    .col(
                        ColumnDef::new(Event::RegistrationOpen)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Event::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Event::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_created_by")
                            .from_tbl(Event::Table)
                            .from_col(Event::CreatedBy)
                            .to_tbl(Faculty::Table)
                            .to_col(Faculty::FacultyId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The composite key is what makes a second registration for the same
        // pair a no-op at the store level.
        manager
            .create_table(
                Table::create()
                    .table(EventRegistration::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventRegistration::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventRegistration::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(EventRegistration::RegisteredAt)
                            .timestamp()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventRegistration::EventId)
                            .col(EventRegistration::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registration_event")
                            .from_tbl(EventRegistration::Table)
                            .from_col(EventRegistration::EventId)
                            .to_tbl(Event::Table)
                            .to_col(Event::EventId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registration_student")
                            .from_tbl(EventRegistration::Table)
                            .from_col(EventRegistration::StudentId)
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
                    .name("idx_event_created_at")
                    .table(Event::Table)
                    .col(Event::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_event_created_at")
                    .table(Event::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EventRegistration::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Event {
    Table,
    EventId,
    Title,
    Description,
    Date,
    Time,
    Venue,
    Organizer,
    Category,
    RegistrationOpen,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EventRegistration {
    Table,
    EventId,
    StudentId,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum Faculty {
    Table,
    FacultyId,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
}
