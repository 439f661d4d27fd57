use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::services::PasswordPolicy;

/// Shared per-process handles, passed to every handler as router state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: Arc<JwtManager>,
    pub upload_dir: PathBuf,
    pub password_policy: PasswordPolicy,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtManager,
        upload_dir: impl Into<PathBuf>,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            db,
            jwt: Arc::new(jwt),
            upload_dir: upload_dir.into(),
            password_policy,
        }
    }

    pub fn from_config(db: DatabaseConnection, config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            db,
            JwtManager::new(&config.jwt_secret, config.jwt_expires_in),
            &config.upload_dir,
            PasswordPolicy::new(config.faculty_password_scheme, config.bcrypt_cost)?,
        ))
    }
}
