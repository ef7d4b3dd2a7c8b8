//! Review catalogue: the shaped, filtered and paginated review reads.
//!
//! - ReviewQueryBuilder: SeaQuery-based SQL generation
//! - ReviewService: runs the count and page queries
//! - Types: ReviewListParams, ReviewListQuery, ReviewPage

mod query_builder;
mod review_service;
pub mod types;

pub use query_builder::ReviewQueryBuilder;
pub use review_service::ReviewService;
pub use types::{ReviewListParams, ReviewListQuery, ReviewPage};
