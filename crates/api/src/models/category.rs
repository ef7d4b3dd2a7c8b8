//! Category model: the game genres reviews are filed under.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A category, keyed by its slug.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique identifier, e.g. `"euro game"`.
    pub slug: String,

    pub description: String,
}

impl Category {
    /// List all categories.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Self>("SELECT slug, description FROM categories")
            .fetch_all(pool)
            .await
            .context("failed to list categories")?;

        Ok(categories)
    }

    /// Create a new category. A taken slug fails with a unique violation.
    pub async fn create(pool: &PgPool, slug: &str, description: &str) -> Result<Self> {
        let category = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO categories (slug, description)
            VALUES ($1, $2)
            RETURNING slug, description
            "#,
        )
        .bind(slug)
        .bind(description)
        .fetch_one(pool)
        .await
        .context("failed to create category")?;

        Ok(category)
    }
}
