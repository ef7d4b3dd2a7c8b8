//! Review read service.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

use super::query_builder::ReviewQueryBuilder;
use super::types::{ReviewListQuery, ReviewPage};
use crate::error::{ApiError, ApiResult, Resource};
use crate::models::Review;

/// Executes the shaped review reads.
pub struct ReviewService {
    pool: PgPool,
    /// Per-statement timeout applied to listing queries, in seconds.
    query_timeout_secs: u64,
}

impl ReviewService {
    /// Create a new ReviewService.
    pub fn new(pool: PgPool, query_timeout_secs: u64) -> Arc<Self> {
        Arc::new(Self {
            pool,
            query_timeout_secs,
        })
    }

    /// List one page of reviews together with the total match count.
    ///
    /// Both queries run in one REPEATABLE READ transaction so `total_count`
    /// and the page see the same snapshot.
    pub async fn list(&self, query: &ReviewListQuery) -> Result<ReviewPage> {
        let builder = ReviewQueryBuilder::new(query);

        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin transaction")?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .context("failed to set isolation level")?;

        sqlx::query(&format!(
            "SET LOCAL statement_timeout = '{}s'",
            self.query_timeout_secs
        ))
        .execute(&mut *tx)
        .await
        .context("failed to set statement timeout")?;

        let count_sql = builder.build_count();
        let total_count: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&mut *tx)
            .await
            .context("failed to execute count query")?;

        let page_sql = builder.build();
        let reviews = sqlx::query_as::<_, Review>(&page_sql)
            .fetch_all(&mut *tx)
            .await
            .context("failed to execute review page query")?;

        tx.commit()
            .await
            .context("failed to commit query transaction")?;

        debug!(
            sort_by = query.sort_by.as_str(),
            category = %query.category,
            page = query.page.page,
            returned = reviews.len(),
            total_count,
            "listed reviews"
        );

        Ok(ReviewPage {
            reviews,
            total_count,
        })
    }

    /// Fetch one shaped review.
    pub async fn find(&self, review_id: i32) -> Result<Option<Review>> {
        let sql = ReviewQueryBuilder::build_by_id(review_id);
        let review = sqlx::query_as::<_, Review>(&sql)
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch review")?;

        Ok(review)
    }

    /// Fetch one shaped review, failing when it does not exist.
    pub async fn get(&self, review_id: i32) -> ApiResult<Review> {
        self.find(review_id)
            .await?
            .ok_or(ApiError::NotFound(Resource::Review))
    }
}
