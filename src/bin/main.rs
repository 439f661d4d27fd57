use std::net::SocketAddr;

use anyhow::Context;
use campus_event_service::app::{HttpOptions, create_app};
use campus_event_service::bootstrap::initialize_admin_user;
use campus_event_service::state::AppState;
use campus_event_service::{config::APP_CONFIG, utils::tracing::init_standard_tracing};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    tracing::info!("Starting application...");

    tracing::info!("Create upload folder");
    tokio::fs::create_dir_all(&APP_CONFIG.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", APP_CONFIG.upload_dir))?;

    let mut options = ConnectOptions::new(APP_CONFIG.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    if APP_CONFIG.run_migrations {
        tracing::info!("Running migrations...");
        Migrator::up(&db, None).await.context("Failed to run migrations")?;
    }

    let state = AppState::from_config(db, &APP_CONFIG)?;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(&state.db, &APP_CONFIG, &state.password_policy).await {
        tracing::error!("Failed to initialize admin user: {:#}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let app = create_app(state, &HttpOptions::from(&*APP_CONFIG));

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {}", http_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;

    Ok(())
}
