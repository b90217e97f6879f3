use anyhow::Context;
use coursehub_config::{CorsConfig, DatabaseConfig, JwtConfig};
use coursehub_db::{PgPool, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

/// Builds the shared state from the environment: configuration is validated
/// first, then the pool is opened and pending migrations are applied.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let cors_config = CorsConfig::from_env();

    let database_config = DatabaseConfig::from_env().context("Invalid database configuration")?;

    let db = init_db_pool(&database_config.url, database_config.max_connections)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    Ok(AppState {
        db,
        jwt_config,
        cors_config,
    })
}
