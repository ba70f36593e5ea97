use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use ak_api::{create_app, AppState, TokenTransport};
use ak_core::services::{AccountService, BcryptHasher, TokenLifecycle};
use ak_infra::{DatabasePool, PgCredentialStore, PgUserRepository};
use ak_shared::{AppConfig, Environment};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables; a missing file is fine
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting Authkeeper API Server ({})", config.environment);

    for problem in config.validate() {
        warn!("Configuration: {}", problem);
    }

    let database = config
        .database
        .clone()
        .with_statement_logging(config.logging.sql_statements);
    let pool = DatabasePool::new(database)
        .await
        .context("failed to connect to the database")?;
    pool.ensure_schema()
        .await
        .context("failed to create the database schema")?;
    if !pool.health_check().await.context("database health check failed")? {
        anyhow::bail!("database health check returned an unexpected value");
    }
    info!("{}", pool.get_statistics());

    let store = Arc::new(PgCredentialStore::new(pool.get_pool().clone()));
    let users = Arc::new(PgUserRepository::new(pool.get_pool().clone()));

    let lifecycle = TokenLifecycle::from_config(store, &config.auth)
        .context("invalid token configuration")?;
    let accounts = AccountService::new(users, BcryptHasher::new(config.auth.bcrypt_cost));
    let transport = TokenTransport::from_config(&config.auth);

    info!("Token transport policy: {}", transport.policy());

    let app_state = web::Data::new(AppState::new(lifecycle, accounts, transport));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
