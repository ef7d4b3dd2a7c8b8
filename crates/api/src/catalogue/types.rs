//! Review listing request and result types.

use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::models::Review;
use crate::validation::{Page, SortBy, SortOrder};

/// Raw query string of `GET /api/reviews`.
///
/// Everything is kept as text so validation can reject it uniformly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
    pub p: Option<String>,
    pub limit: Option<String>,
}

/// Validated review listing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewListQuery {
    pub sort_by: SortBy,
    pub order: SortOrder,

    /// Substring matched against the category slug. Empty matches everything.
    pub category: String,

    pub page: Page,
}

impl ReviewListQuery {
    /// Validate raw parameters. Sort options are checked first.
    pub fn parse(params: &ReviewListParams) -> ApiResult<Self> {
        let sort_by = params
            .sort_by
            .as_deref()
            .map(str::parse::<SortBy>)
            .transpose()?
            .unwrap_or_default();
        let order = params
            .order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();
        let page = Page::from_query(params.p.as_deref(), params.limit.as_deref())?;
        // Validated here so the builder never sees an out-of-range window.
        page.bounds()?;

        Ok(Self {
            sort_by,
            order,
            category: params.category.clone().unwrap_or_default(),
            page,
        })
    }
}

/// One page of reviews plus the unpaginated match count.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,

    #[serde(rename = "totalCount")]
    pub total_count: i64,
}
