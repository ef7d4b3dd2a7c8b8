//! Review API routes.
//!
//! Listing and single lookups go through [`crate::catalogue::ReviewService`]
//! so every response carries the aliased columns and `comment_count`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::catalogue::{ReviewListParams, ReviewListQuery, ReviewPage};
use crate::error::{ApiError, ApiResult, Resource};
use crate::models::{CreateReview, Review};
use crate::routes::{ReviewsBody, json_body};
use crate::state::AppState;
use crate::validation::{VoteIncrement, parse_id, require};

/// Create the review router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(list_reviews).post(create_review))
        .route(
            "/api/reviews/{review_id}",
            get(get_review).patch(update_review_votes).delete(delete_review),
        )
}

/// `POST /api/reviews` body. Every field but the image is required.
#[derive(Debug, Deserialize)]
struct NewReview {
    title: Option<String>,
    designer: Option<String>,
    owner: Option<String>,
    review_img_url: Option<String>,
    review_body: Option<String>,
    category: Option<String>,
}

impl NewReview {
    fn into_create(self) -> ApiResult<CreateReview> {
        Ok(CreateReview {
            title: require(self.title)?,
            designer: require(self.designer)?,
            owner: require(self.owner)?,
            review_img_url: self.review_img_url,
            review_body: require(self.review_body)?,
            category: require(self.category)?,
        })
    }
}

/// List reviews with sorting, category filter and pagination.
async fn list_reviews(
    State(state): State<AppState>,
    params: Result<Query<ReviewListParams>, QueryRejection>,
) -> ApiResult<Json<ReviewPage>> {
    let Query(params) = params.map_err(|_| ApiError::InvalidInput)?;
    let query = ReviewListQuery::parse(&params)?;

    let page = state.reviews().list(&query).await?;
    Ok(Json(page))
}

/// Create a review and return it in its shaped form.
async fn create_review(
    State(state): State<AppState>,
    body: Result<Json<NewReview>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReviewsBody<Review>>)> {
    let input = json_body(body)?.into_create()?;

    let review_id = Review::create(state.db(), input).await?;
    info!(review_id, "review created");

    let review = state.reviews().get(review_id).await?;
    Ok((StatusCode::CREATED, Json(ReviewsBody { reviews: review })))
}

async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> ApiResult<Json<ReviewsBody<[Review; 1]>>> {
    let review_id = parse_id(&review_id)?;
    let review = state.reviews().get(review_id).await?;

    Ok(Json(ReviewsBody { reviews: [review] }))
}

/// Apply `inc_votes` to a review's vote count.
async fn update_review_votes(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: Result<Json<VoteIncrement>, JsonRejection>,
) -> ApiResult<Json<ReviewsBody<[Review; 1]>>> {
    let review_id = parse_id(&review_id)?;
    let delta = json_body(body)?.delta()?;

    if !Review::increment_votes(state.db(), review_id, delta).await? {
        return Err(ApiError::NotFound(Resource::Review));
    }

    let review = state.reviews().get(review_id).await?;
    Ok(Json(ReviewsBody { reviews: [review] }))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> ApiResult<StatusCode> {
    let review_id = parse_id(&review_id)?;

    if !Review::delete(state.db(), review_id).await? {
        return Err(ApiError::NotFound(Resource::Review));
    }

    info!(review_id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn invalid_sort_rejected_before_store() {
        let (status, body) = send("GET", "/api/reviews?sort_by=fish&order=bird", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: Invalid sorting options");
    }

    #[tokio::test]
    async fn invalid_order_rejected() {
        let (status, body) = send("GET", "/api/reviews?order=sideways", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: Invalid sorting options");
    }

    #[tokio::test]
    async fn zero_page_is_invalid_input() {
        let (status, body) = send("GET", "/api/reviews?p=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }

    #[tokio::test]
    async fn non_numeric_id_is_invalid_input() {
        let (status, body) = send("GET", "/api/reviews/fish", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }

    #[tokio::test]
    async fn vote_patch_requires_numeric_increment() {
        let (status, body) = send(
            "PATCH",
            "/api/reviews/2",
            Some(r#"{"inc_votes": "twenty"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }

    #[tokio::test]
    async fn vote_patch_rejects_increment_beyond_column_range() {
        let (status, body) = send(
            "PATCH",
            "/api/reviews/2",
            Some(r#"{"inc_votes": 4294967296}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }

    #[tokio::test]
    async fn vote_patch_requires_inc_votes_key() {
        let (status, body) = send("PATCH", "/api/reviews/2", Some(r#"{"falseKey": 10}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }

    #[tokio::test]
    async fn create_requires_every_field_but_image() {
        let (status, body) = send(
            "POST",
            "/api/reviews",
            Some(r#"{"title": "Catan", "designer": "Klaus Teuber", "owner": "mallionaire"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "At least one attribute has an invalid value");
    }

    #[tokio::test]
    async fn delete_with_bad_id() {
        let (status, body) = send("DELETE", "/api/reviews/-3", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }
}
