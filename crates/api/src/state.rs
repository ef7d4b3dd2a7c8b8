//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::catalogue::ReviewService;
use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Shaped review reads (listing, single lookup).
    reviews: Arc<ReviewService>,
}

impl AppState {
    /// Connect to PostgreSQL and build the state.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::connect(config)
            .await
            .context("failed to create database pool")?;
        info!(
            max_connections = config.database_max_connections,
            "connected to PostgreSQL"
        );

        Ok(Self::from_pool(db, config.query_timeout_secs))
    }

    /// Build the state around an existing pool.
    pub fn from_pool(db: PgPool, query_timeout_secs: u64) -> Self {
        let reviews = ReviewService::new(db.clone(), query_timeout_secs);

        Self {
            inner: Arc::new(AppStateInner { db, reviews }),
        }
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the review read service.
    pub fn reviews(&self) -> &Arc<ReviewService> {
        &self.inner.reviews
    }

    /// Probe the review store.
    pub async fn store_status(&self) -> StoreStatus {
        match db::schema_ready(&self.inner.db).await {
            Ok(true) => StoreStatus::Ready,
            Ok(false) => StoreStatus::MissingSchema,
            Err(e) => {
                warn!(error = %e, "review store unreachable");
                StoreStatus::Unreachable
            }
        }
    }
}

/// Outcome of [`AppState::store_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Ready,
    /// Reachable, but `seed` has not created the tables yet.
    MissingSchema,
    Unreachable,
}
