use clap::{Parser, ValueEnum};
use once_cell::sync::Lazy;

pub const JWT_DEFAULT_EXPIRED_TIME: i64 = 3600i64;

/// Work factor for faculty password hashes and the unknown-identifier
/// dummy hash. Must match the cost of provisioned records.
pub const BCRYPT_DEFAULT_COST: u32 = 10;

pub const CERTIFICATE_ARTIFACT_DIR: &str = "certificates";

/// Body limit for the bulk certificate upload (roster plus artifacts).
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

/// How stored faculty passwords are compared at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PasswordScheme {
    /// Stored value is a bcrypt hash.
    Bcrypt,
    /// Stored value is compared verbatim (legacy records).
    Plain,
}

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 5000)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value_t = true)]
    pub run_migrations: bool,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = JWT_DEFAULT_EXPIRED_TIME)]
    pub jwt_expires_in: i64,

    #[clap(long, env, value_enum, default_value_t = PasswordScheme::Bcrypt)]
    pub faculty_password_scheme: PasswordScheme,

    #[clap(long, env, default_value_t = BCRYPT_DEFAULT_COST)]
    pub bcrypt_cost: u32,

    #[clap(long, env, default_value = "./uploads")]
    pub upload_dir: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env)]
    pub admin_faculty_id: Option<String>,

    #[clap(long, env)]
    pub admin_password: Option<String>,

    #[clap(long, env, default_value = "admin@campus.local")]
    pub admin_email: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
