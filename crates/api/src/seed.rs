//! Database seeding.
//!
//! Drops and recreates the tables, then loads each collection of a
//! [`SeedData`] file with one multi-row INSERT. Everything runs in a single
//! transaction: a bad file leaves the previous data in place.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_query::{Expr, InsertStatement, PostgresQueryBuilder, Query, SimpleExpr};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::schema::{CREATE_TABLES, Categories, Comments, Reviews, Users};

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    pub categories: Vec<SeedCategory>,
    pub users: Vec<SeedUser>,
    pub reviews: Vec<SeedReview>,
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// Seed review. Ids are assigned in file order, starting at 1.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedReview {
    pub title: String,
    pub designer: String,
    pub owner: String,
    #[serde(default)]
    pub review_img_url: Option<String>,
    pub review_body: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
    pub body: String,
    #[serde(default)]
    pub votes: i32,
    pub author: String,
    pub review_id: i32,
    pub created_at: DateTime<Utc>,
}

impl SeedData {
    /// Read a seed file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let data = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;

        Ok(data)
    }
}

/// Recreate the schema and load `data`.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<()> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    for statement in CREATE_TABLES {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .context("failed to recreate schema")?;
    }

    for (table, insert) in insert_statements(data)? {
        execute_insert(&mut tx, table, insert).await?;
    }

    tx.commit().await.context("failed to commit seed")?;

    info!(
        categories = data.categories.len(),
        users = data.users.len(),
        reviews = data.reviews.len(),
        comments = data.comments.len(),
        "database seeded"
    );

    Ok(())
}

async fn execute_insert(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    insert: InsertStatement,
) -> Result<()> {
    let sql = insert.to_string(PostgresQueryBuilder);
    sqlx::query(&sql)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("failed to seed {table}"))?;

    Ok(())
}

/// One INSERT per non-empty collection, in foreign-key order.
fn insert_statements(data: &SeedData) -> Result<Vec<(&'static str, InsertStatement)>> {
    let mut statements = Vec::new();

    if !data.categories.is_empty() {
        let mut insert = Query::insert();
        insert
            .into_table(Categories::Table)
            .columns([Categories::Slug, Categories::Description]);
        for category in &data.categories {
            insert
                .values([
                    category.slug.as_str().into(),
                    category.description.as_str().into(),
                ])
                .context("category row mismatch")?;
        }
        statements.push(("categories", insert));
    }

    if !data.users.is_empty() {
        let mut insert = Query::insert();
        insert
            .into_table(Users::Table)
            .columns([Users::Username, Users::Name, Users::AvatarUrl]);
        for user in &data.users {
            insert
                .values([
                    user.username.as_str().into(),
                    user.name.as_str().into(),
                    user.avatar_url.as_str().into(),
                ])
                .context("user row mismatch")?;
        }
        statements.push(("users", insert));
    }

    if !data.reviews.is_empty() {
        let mut insert = Query::insert();
        insert.into_table(Reviews::Table).columns([
            Reviews::GameTitle,
            Reviews::GameDesigner,
            Reviews::Owner,
            Reviews::ReviewImgUrl,
            Reviews::ReviewBody,
            Reviews::Category,
            Reviews::CreatedAt,
            Reviews::Votes,
        ]);
        for review in &data.reviews {
            let img: SimpleExpr = match &review.review_img_url {
                Some(url) => url.as_str().into(),
                None => Expr::cust("DEFAULT"),
            };
            insert
                .values([
                    review.title.as_str().into(),
                    review.designer.as_str().into(),
                    review.owner.as_str().into(),
                    img,
                    review.review_body.as_str().into(),
                    review.category.as_str().into(),
                    review.created_at.into(),
                    review.votes.into(),
                ])
                .context("review row mismatch")?;
        }
        statements.push(("reviews", insert));
    }

    if !data.comments.is_empty() {
        let mut insert = Query::insert();
        insert.into_table(Comments::Table).columns([
            Comments::Body,
            Comments::Votes,
            Comments::Author,
            Comments::ReviewId,
            Comments::CreatedAt,
        ]);
        for comment in &data.comments {
            insert
                .values([
                    comment.body.as_str().into(),
                    comment.votes.into(),
                    comment.author.as_str().into(),
                    comment.review_id.into(),
                    comment.created_at.into(),
                ])
                .context("comment row mismatch")?;
        }
        statements.push(("comments", insert));
    }

    Ok(statements)
}
