use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::repositories::{FacultyRepository, NewFaculty};
use crate::services::PasswordPolicy;

/// Creates the admin faculty record named by `ADMIN_FACULTY_ID` unless it
/// already exists. Does nothing when no admin credentials are configured.
pub async fn initialize_admin_user(
    db: &DatabaseConnection,
    config: &Config,
    policy: &PasswordPolicy,
) -> Result<()> {
    let (Some(faculty_code), Some(password)) = (
        config.admin_faculty_id.as_deref(),
        config.admin_password.as_deref(),
    ) else {
        tracing::info!("No admin credentials configured, skipping admin initialization");
        return Ok(());
    };

    let repo = FacultyRepository::new(db);

    let existing_admin = repo
        .find_by_code(faculty_code)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let stored_password = policy
        .protect(password)
        .context("Failed to hash admin password")?;

    let admin = repo
        .create(NewFaculty {
            faculty_code: faculty_code.to_string(),
            name: "System Administrator".to_string(),
            department: "Administration".to_string(),
            email: config.admin_email.clone(),
            phone: String::new(),
            designation: "Administrator".to_string(),
            password: stored_password,
            role: RoleEnum::Admin,
        })
        .await
        .context("Failed to create admin user")?;

    tracing::info!(faculty_id = %admin.faculty_id, "Admin user created");
    Ok(())
}
