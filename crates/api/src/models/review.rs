//! Review model.
//!
//! Reads go through [`crate::catalogue`], which shapes rows (column aliases,
//! `comment_count`). This module holds the write statements.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_query::{PostgresQueryBuilder, Query, SimpleExpr};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::schema::Reviews;

/// Review as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub review_id: i32,
    pub title: String,
    pub designer: String,
    pub owner: String,
    pub review_img_url: String,
    pub review_body: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,

    /// Number of comments on this review, computed at read time.
    pub comment_count: i64,
}

/// Input for creating a review.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub title: String,
    pub designer: String,
    pub owner: String,
    pub review_img_url: Option<String>,
    pub review_body: String,
    pub category: String,
}

impl Review {
    /// Insert a review and return its generated id.
    ///
    /// `created_at` and `votes` take their column defaults, as does
    /// `review_img_url` when absent.
    pub async fn create(pool: &PgPool, input: CreateReview) -> Result<i32> {
        let sql = insert_statement(input)?;

        let review_id: i32 = sqlx::query_scalar(&sql)
            .fetch_one(pool)
            .await
            .context("failed to create review")?;

        Ok(review_id)
    }

    /// Add `delta` to the vote count in a single statement.
    ///
    /// Returns `false` when no review has this id.
    pub async fn increment_votes(pool: &PgPool, review_id: i32, delta: i32) -> Result<bool> {
        let result = sqlx::query("UPDATE reviews SET votes = votes + $1 WHERE review_id = $2")
            .bind(delta)
            .bind(review_id)
            .execute(pool)
            .await
            .context("failed to update review votes")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a review (its comments go with it).
    pub async fn delete(pool: &PgPool, review_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id)
            .execute(pool)
            .await
            .context("failed to delete review")?;

        Ok(result.rows_affected() > 0)
    }
}

fn insert_statement(input: CreateReview) -> Result<String> {
    let mut columns = vec![
        Reviews::GameTitle,
        Reviews::GameDesigner,
        Reviews::Owner,
        Reviews::ReviewBody,
        Reviews::Category,
    ];
    let mut values: Vec<SimpleExpr> = vec![
        input.title.into(),
        input.designer.into(),
        input.owner.into(),
        input.review_body.into(),
        input.category.into(),
    ];

    if let Some(url) = input.review_img_url {
        columns.push(Reviews::ReviewImgUrl);
        values.push(url.into());
    }

    let sql = Query::insert()
        .into_table(Reviews::Table)
        .columns(columns)
        .values(values)
        .context("review insert column/value mismatch")?
        .returning_col(Reviews::ReviewId)
        .to_string(PostgresQueryBuilder);

    Ok(sql)
}
