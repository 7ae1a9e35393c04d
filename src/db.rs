use anyhow::Context;
use sqlx::{migrate::MigrateError, sqlite::SqlitePoolOptions, SqlitePool};

use crate::config::AppConfig;

/// Open the connection pool described by `config`.
pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let db = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Apply the bundled migrations (creates the `users` table).
pub async fn migrate(db: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}
