//! Review query builder using SeaQuery.
//!
//! Generates the shaped review SELECT shared by the listing and the single
//! lookup:
//! - storage columns aliased to their public names (`title`, `designer`)
//! - `comment_count` aggregated over a LEFT JOIN, so reviews without comments
//!   still appear with a count of 0
//! - category substring filter, whitelisted sort, pagination

use sea_query::{Alias, Asterisk, Expr, Order, PostgresQueryBuilder, Query, SelectStatement};

use super::types::ReviewListQuery;
use crate::schema::{Comments, Reviews};
use crate::validation::{SortBy, SortOrder};

/// Query builder for review reads.
pub struct ReviewQueryBuilder<'a> {
    query: &'a ReviewListQuery,
}

impl<'a> ReviewQueryBuilder<'a> {
    /// Create a builder for a validated listing query.
    pub fn new(query: &'a ReviewListQuery) -> Self {
        Self { query }
    }

    /// Build the page SELECT.
    pub fn build(&self) -> String {
        let mut query = shaped_select();

        self.add_category_filter(&mut query);
        self.add_sort(&mut query);

        // LIMIT/OFFSET for pagination
        query.limit(self.query.page.limit);
        query.offset(self.query.page.offset());

        query.to_string(PostgresQueryBuilder)
    }

    /// Build the COUNT query over the same filter, without pagination.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query.expr(Expr::col(Asterisk).count());
        query.from(Reviews::Table);

        self.add_category_filter(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    /// Build the shaped SELECT for a single review.
    pub fn build_by_id(review_id: i32) -> String {
        let mut query = shaped_select();
        query.and_where(Expr::col((Reviews::Table, Reviews::ReviewId)).eq(review_id));
        query.to_string(PostgresQueryBuilder)
    }

    /// Substring match on the category slug. An empty filter matches all rows.
    fn add_category_filter(&self, query: &mut SelectStatement) {
        let category = &self.query.category;
        if category.is_empty() {
            return;
        }

        query.and_where(
            Expr::col((Reviews::Table, Reviews::Category))
                .like(format!("%{}%", escape_like_wildcards(category))),
        );
    }

    /// ORDER BY the whitelisted column, then by id so ties are stable.
    fn add_sort(&self, query: &mut SelectStatement) {
        let order = match self.query.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        query.order_by((Reviews::Table, sort_column(self.query.sort_by)), order);

        if self.query.sort_by != SortBy::ReviewId {
            query.order_by((Reviews::Table, Reviews::ReviewId), Order::Asc);
        }
    }
}

/// Storage column for each accepted sort key.
fn sort_column(sort_by: SortBy) -> Reviews {
    match sort_by {
        SortBy::Owner => Reviews::Owner,
        SortBy::Title => Reviews::GameTitle,
        SortBy::ReviewId => Reviews::ReviewId,
        SortBy::ReviewBody => Reviews::ReviewBody,
        SortBy::Designer => Reviews::GameDesigner,
        SortBy::ReviewImgUrl => Reviews::ReviewImgUrl,
        SortBy::CreatedAt => Reviews::CreatedAt,
        SortBy::Votes => Reviews::Votes,
    }
}

/// Reviews joined to their comments, grouped per review.
fn shaped_select() -> SelectStatement {
    let mut query = Query::select();

    query
        .column((Reviews::Table, Reviews::Owner))
        .expr_as(
            Expr::col((Reviews::Table, Reviews::GameTitle)),
            Alias::new("title"),
        )
        .column((Reviews::Table, Reviews::ReviewId))
        .column((Reviews::Table, Reviews::ReviewBody))
        .expr_as(
            Expr::col((Reviews::Table, Reviews::GameDesigner)),
            Alias::new("designer"),
        )
        .column((Reviews::Table, Reviews::ReviewImgUrl))
        .column((Reviews::Table, Reviews::Category))
        .column((Reviews::Table, Reviews::CreatedAt))
        .column((Reviews::Table, Reviews::Votes))
        .expr_as(
            Expr::col((Comments::Table, Comments::CommentId)).count(),
            Alias::new("comment_count"),
        )
        .from(Reviews::Table)
        .left_join(
            Comments::Table,
            Expr::col((Comments::Table, Comments::ReviewId))
                .equals((Reviews::Table, Reviews::ReviewId)),
        )
        .group_by_col((Reviews::Table, Reviews::ReviewId));

    query
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
