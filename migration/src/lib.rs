pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_table_principals;
mod m20250301_000002_create_table_event;
mod m20250305_000003_create_table_on_duty_request;
mod m20250310_000004_create_table_certificate;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_table_principals::Migration),
            Box::new(m20250301_000002_create_table_event::Migration),
            Box::new(m20250305_000003_create_table_on_duty_request::Migration),
            Box::new(m20250310_000004_create_table_certificate::Migration),
        ]
    }
}
