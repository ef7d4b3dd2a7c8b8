//! PostgreSQL pool for the review store.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::Config;

/// Reported to the server as `application_name`, visible in `pg_stat_activity`.
const APPLICATION_NAME: &str = "boardgame-reviews";

/// Tables the service cannot answer without.
const REQUIRED_TABLES: [&str; 4] = ["categories", "users", "reviews", "comments"];

/// Connection options parsed from `DATABASE_URL`.
pub fn connect_options(config: &Config) -> Result<PgConnectOptions> {
    let options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid PostgreSQL URL")?
        .application_name(APPLICATION_NAME);

    Ok(options)
}

/// Open the pool. Waiting for a free connection is bounded by the same
/// timeout as the listing queries.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(config.query_timeout_secs.max(1)))
        .connect_with(connect_options(config)?)
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Whether every review-store table exists. An error means the server
/// could not be reached at all.
pub async fn schema_ready(pool: &PgPool) -> Result<bool> {
    let present: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = ANY($1)",
    )
    .bind(&REQUIRED_TABLES[..])
    .fetch_one(pool)
    .await
    .context("failed to inspect schema")?;

    Ok(present == REQUIRED_TABLES.len() as i64)
}
