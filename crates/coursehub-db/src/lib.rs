//! # CourseHub DB
//!
//! Database pool and migrations for the CourseHub API.
//!
//! The pool is created once at startup, stored in the application state and
//! cloned into every request. Migrations live in the workspace `migrations/`
//! directory and are embedded into the binary at compile time.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool.
///
/// Acquiring a connection times out after five seconds; the auth gate surfaces
/// that as an internal failure rather than hanging the request.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!(max_connections, "Database pool initialized");
    Ok(pool)
}

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
