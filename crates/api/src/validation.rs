//! Input validation for path, query and body values.
//!
//! Path and query parameters are extracted as raw strings and parsed here, so
//! that every rejection goes through [`ApiError`] and renders the same way.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// Columns a review listing may be sorted by.
///
/// The query builder maps each variant to one fixed storage column, so caller
/// text never reaches the SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Owner,
    Title,
    ReviewId,
    ReviewBody,
    Designer,
    ReviewImgUrl,
    #[default]
    CreatedAt,
    Votes,
}

impl SortBy {
    /// Every accepted value, in whitelist order.
    pub const ALL: [SortBy; 8] = [
        SortBy::Owner,
        SortBy::Title,
        SortBy::ReviewId,
        SortBy::ReviewBody,
        SortBy::Designer,
        SortBy::ReviewImgUrl,
        SortBy::CreatedAt,
        SortBy::Votes,
    ];

    /// Public (query string) name.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Owner => "owner",
            SortBy::Title => "title",
            SortBy::ReviewId => "review_id",
            SortBy::ReviewBody => "review_body",
            SortBy::Designer => "designer",
            SortBy::ReviewImgUrl => "review_img_url",
            SortBy::CreatedAt => "created_at",
            SortBy::Votes => "votes",
        }
    }
}

impl FromStr for SortBy {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or(ApiError::InvalidSortKind)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(ApiError::InvalidSortKind)
        }
    }
}

/// Parse a primary-key path segment. Must be a positive 32-bit integer.
pub fn parse_id(raw: &str) -> ApiResult<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidInput),
    }
}

/// Parse an optional positive integer query parameter (`p`, `limit`).
pub fn parse_positive(raw: Option<&str>, default: u64) -> ApiResult<u64> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::InvalidInput),
        },
    }
}

/// Unwrap a required body field; a missing or null value is `InvalidAttribute`.
pub fn require<T>(value: Option<T>) -> ApiResult<T> {
    value.ok_or(ApiError::InvalidAttribute)
}

/// `{ "inc_votes": n }` body of the vote PATCH endpoints.
///
/// Absent and zero are distinct: zero is a valid increment, absence is not.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteIncrement {
    pub inc_votes: Option<i32>,
}

impl VoteIncrement {
    /// The increment to apply.
    pub fn delta(&self) -> ApiResult<i32> {
        self.inc_votes.ok_or(ApiError::InvalidInput)
    }
}

/// Pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub page: u64,
    /// Rows per page.
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Build from raw `p` / `limit` query values.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> ApiResult<Self> {
        Ok(Self {
            page: parse_positive(page, 1)?,
            limit: parse_positive(limit, Self::DEFAULT_LIMIT)?,
        })
    }

    /// Rows to skip: `limit * (page - 1)`.
    pub fn offset(&self) -> u64 {
        self.limit.saturating_mul(self.page.saturating_sub(1))
    }

    /// `(limit, offset)` checked against the store's BIGINT range.
    pub fn bounds(&self) -> ApiResult<(i64, i64)> {
        let limit = i64::try_from(self.limit).map_err(|_| ApiError::InvalidInput)?;
        let offset = i64::try_from(self.offset()).map_err(|_| ApiError::InvalidInput)?;
        Ok((limit, offset))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_whitelisted_sort_parses() {
        for sort in SortBy::ALL {
            assert_eq!(sort.as_str().parse::<SortBy>().unwrap(), sort);
        }
    }

    #[test]
    fn unknown_sort_is_rejected() {
        for raw in ["fish", "", "Owner", "votes; DROP TABLE reviews", "comment_count"] {
            assert!(
                matches!(raw.parse::<SortBy>(), Err(ApiError::InvalidSortKind)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn order_is_case_insensitive() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!(matches!(
            "bird".parse::<SortOrder>(),
            Err(ApiError::InvalidSortKind)
        ));
    }

    #[test]
    fn defaults() {
        assert_eq!(SortBy::default(), SortBy::CreatedAt);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!(Page::default(), Page { page: 1, limit: 10 });
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("2").unwrap(), 2);
        assert!(matches!(parse_id("fish"), Err(ApiError::InvalidInput)));
        assert!(matches!(parse_id("0"), Err(ApiError::InvalidInput)));
        assert!(matches!(parse_id("-4"), Err(ApiError::InvalidInput)));
        assert!(matches!(parse_id("99999999999"), Err(ApiError::InvalidInput)));
    }

    #[test]
    fn page_parameters() {
        assert_eq!(parse_positive(None, 10).unwrap(), 10);
        assert_eq!(parse_positive(Some("3"), 10).unwrap(), 3);
        assert!(matches!(
            parse_positive(Some("0"), 10),
            Err(ApiError::InvalidInput)
        ));
        assert!(matches!(
            parse_positive(Some("ten"), 10),
            Err(ApiError::InvalidInput)
        ));
    }

    #[test]
    fn offset_is_limit_times_previous_pages() {
        let page = Page::from_query(Some("3"), Some("3")).unwrap();
        assert_eq!(page.offset(), 6);
        assert_eq!(Page::default().offset(), 0);
    }

    #[test]
    fn out_of_range_window_is_invalid_input() {
        let page = Page {
            page: u64::MAX,
            limit: 10,
        };
        assert!(matches!(page.bounds(), Err(ApiError::InvalidInput)));
        assert_eq!(Page::default().bounds().unwrap(), (10, 0));
    }

    #[test]
    fn zero_increment_is_valid() {
        let inc: VoteIncrement = serde_json::from_str(r#"{"inc_votes": 0}"#).unwrap();
        assert_eq!(inc.delta().unwrap(), 0);
    }

    #[test]
    fn missing_increment_is_invalid_input() {
        let inc: VoteIncrement = serde_json::from_str(r#"{"falseKey": 10}"#).unwrap();
        assert!(matches!(inc.delta(), Err(ApiError::InvalidInput)));
    }

    #[test]
    fn require_rejects_none() {
        assert_eq!(require(Some("Ben")).unwrap(), "Ben");
        assert!(matches!(
            require::<String>(None),
            Err(ApiError::InvalidAttribute)
        ));
    }
}
