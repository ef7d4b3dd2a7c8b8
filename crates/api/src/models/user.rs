//! User model.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// Username-only projection used by the user listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Username {
    pub username: String,
}

impl User {
    /// Find a user by username.
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("failed to fetch user by username")?;

        Ok(user)
    }

    /// List every username.
    pub async fn list_usernames(pool: &PgPool) -> Result<Vec<Username>> {
        let users = sqlx::query_as::<_, Username>("SELECT username FROM users ORDER BY username")
            .fetch_all(pool)
            .await
            .context("failed to list users")?;

        Ok(users)
    }
}
