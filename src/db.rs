use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DbConfig;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        age INTEGER NOT NULL,
        phone VARCHAR(20),
        is_hidden BOOLEAN DEFAULT FALSE,
        rating NUMERIC(3, 2),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

pub async fn connect(cfg: &DbConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections.min(cfg.max_connections))
        .max_lifetime(Duration::from_secs(5 * 60))
        .connect(&cfg.url)
        .await
        .context("connect to database")?;
    tracing::info!(max_connections = cfg.max_connections, "connected to database");
    Ok(pool)
}

/// Creates the `users` table if it does not exist yet.
pub async fn ensure_schema(db: &PgPool) -> anyhow::Result<()> {
    sqlx::query(CREATE_USERS_TABLE)
        .execute(db)
        .await
        .context("create users table")?;
    tracing::info!("users table is ready");
    Ok(())
}
