//! Server bootstrap: pool construction, migrations, port wiring, and the
//! actix server loop.

pub mod config;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use chrono::Duration;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use feedback_backend::domain::analytics_service::AnalyticsService;
use feedback_backend::domain::identity_service::AccountIdentityService;
use feedback_backend::domain::ledger_service::LedgerService;
use feedback_backend::inbound::http::configure_api;
use feedback_backend::inbound::http::state::HttpState;
use feedback_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselAnalyticsRepository, DieselFacultyDirectory,
    DieselFeedbackRepository, PoolConfig,
};
use feedback_backend::Trace;
#[cfg(debug_assertions)]
use feedback_backend::ApiDoc;

use self::config::AppConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations over a dedicated synchronous connection.
fn run_migrations(database_url: &str) -> Result<(), String> {
    let mut conn = diesel::PgConnection::establish(database_url)
        .map_err(|err| format!("failed to connect for migrations: {err}"))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("failed to run migrations: {err}"))?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}

/// Wire the Diesel adapters and domain services into the handler state.
fn build_state(pool: &DbPool, token_ttl: Duration) -> HttpState {
    let feedback_repo = Arc::new(DieselFeedbackRepository::new(pool.clone()));
    let analytics_repo = Arc::new(DieselAnalyticsRepository::new(pool.clone()));
    let directory = Arc::new(DieselFacultyDirectory::new(pool.clone()));
    let accounts = Arc::new(DieselAccountRepository::new(pool.clone()));

    HttpState {
        identity: Arc::new(AccountIdentityService::new(accounts, token_ttl)),
        ledger: Arc::new(LedgerService::new(feedback_repo, Arc::clone(&directory))),
        analytics: Arc::new(AnalyticsService::new(analytics_repo)),
        faculties: directory,
    }
}

/// Run the HTTP server until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    {
        let database_url = config.database_url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&database_url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(
        PoolConfig::new(config.database_url.clone()).with_max_size(config.pool_size),
    )
    .await
    .map_err(std::io::Error::other)?;

    let state = web::Data::new(build_state(
        &pool,
        Duration::days(config.session_ttl_days),
    ));

    info!(addr = %config.bind_addr, "starting feedback backend");
    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure_api);
        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        app
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
