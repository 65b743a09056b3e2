mod config;
mod data_formats;
pub mod db_helpers;
mod errors;
mod models;

use std::str::FromStr;

use anyhow::Context;
pub use anyhow::Result;
pub use config::DbConfig;
pub use data_formats::*;
pub use errors::*;
pub use models::*;
use sqlx::{
    migrate::{MigrateDatabase, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates the database if it does not exist yet, connects and applies migrations.
pub async fn init_db(config: &DbConfig) -> Result<SqlitePool> {
    let db_url = &config.database_url;
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!(%db_url, "creating database");
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {db_url}"))?;
    } else {
        info!(%db_url, "database already exists");
    }
    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("Invalid DATABASE_URL {db_url}"))?
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;
    migrate(&pool).await?;
    Ok(pool)
}

/// A private in-memory database with the schema applied. It lives as long as the
/// pool's single connection.
pub async fn init_memory_db() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to open in-memory database")?;
    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    info!("running migrations");
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("migrations completed");
    Ok(())
}

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
