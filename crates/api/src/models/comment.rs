//! Comment model for discussion on reviews.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Comment record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i32,

    /// Username of the author.
    pub author: String,

    /// Review this comment belongs to.
    pub review_id: i32,

    pub votes: i32,
    pub created_at: DateTime<Utc>,
    pub body: String,
}

/// Input for creating a comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub review_id: i32,
    pub author: String,
    pub body: String,
}

/// Comment as returned right after creation: `author` is exposed as `username`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostedComment {
    pub comment_id: i32,
    pub username: String,
    pub body: String,
}

const COMMENT_COLUMNS: &str = "comment_id, author, review_id, votes, created_at, body";

impl Comment {
    /// Create a new comment.
    pub async fn create(pool: &PgPool, input: CreateComment) -> Result<PostedComment> {
        let comment = sqlx::query_as::<_, PostedComment>(
            r#"
            INSERT INTO comments (author, body, review_id)
            VALUES ($1, $2, $3)
            RETURNING comment_id, author AS username, body
            "#,
        )
        .bind(&input.author)
        .bind(&input.body)
        .bind(input.review_id)
        .fetch_one(pool)
        .await
        .context("failed to create comment")?;

        Ok(comment)
    }

    /// List comments for a review with pagination (newest first).
    pub async fn list_for_review(
        pool: &PgPool,
        review_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE review_id = $1
            ORDER BY created_at DESC, comment_id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(review_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("failed to list comments for review")?;

        Ok(comments)
    }

    /// Add `delta` to the vote count in a single statement.
    ///
    /// Returns `None` when no comment has this id.
    pub async fn increment_votes(
        pool: &PgPool,
        comment_id: i32,
        delta: i32,
    ) -> Result<Option<Self>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET votes = votes + $1
            WHERE comment_id = $2
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(delta)
        .bind(comment_id)
        .fetch_optional(pool)
        .await
        .context("failed to update comment votes")?;

        Ok(comment)
    }

    /// Delete a comment.
    pub async fn delete(pool: &PgPool, comment_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(pool)
            .await
            .context("failed to delete comment")?;

        Ok(result.rows_affected() > 0)
    }
}
