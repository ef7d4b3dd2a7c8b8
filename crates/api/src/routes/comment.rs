//! Comment routes.
//!
//! Comment reads and writes against a review first resolve the review, so a
//! missing review reports the review lookup's error.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult, Resource};
use crate::models::{Comment, CreateComment, PostedComment};
use crate::routes::{CommentsBody, json_body};
use crate::state::AppState;
use crate::validation::{Page, VoteIncrement, parse_id, require};

/// Message returned with a 200 when a review has no comments on the page.
const NO_RESULTS: &str = "No Results";

/// Create the comment router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/reviews/{review_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            patch(update_comment_votes).delete(delete_comment),
        )
}

#[derive(Debug, Default, Deserialize)]
struct CommentListParams {
    limit: Option<String>,
    p: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewComment {
    username: Option<String>,
    body: Option<String>,
}

/// Either a page of comments or the "no results" message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CommentListing {
    Comments { comments: Vec<Comment> },
    Empty { msg: &'static str },
}

async fn list_comments(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    params: Result<Query<CommentListParams>, QueryRejection>,
) -> ApiResult<Json<CommentListing>> {
    let review_id = parse_id(&review_id)?;
    let Query(params) = params.map_err(|_| ApiError::InvalidInput)?;
    let (limit, offset) =
        Page::from_query(params.p.as_deref(), params.limit.as_deref())?.bounds()?;

    state.reviews().get(review_id).await?;

    let comments = Comment::list_for_review(state.db(), review_id, limit, offset).await?;
    if comments.is_empty() {
        return Ok(Json(CommentListing::Empty { msg: NO_RESULTS }));
    }

    Ok(Json(CommentListing::Comments { comments }))
}

async fn create_comment(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentsBody<[PostedComment; 1]>>)> {
    let review_id = parse_id(&review_id)?;
    let input = json_body(body)?;

    state.reviews().get(review_id).await?;

    let comment = Comment::create(
        state.db(),
        CreateComment {
            review_id,
            author: require(input.username)?,
            body: require(input.body)?,
        },
    )
    .await?;
    tracing::info!(comment_id = comment.comment_id, review_id, "comment created");

    Ok((
        StatusCode::CREATED,
        Json(CommentsBody {
            comments: [comment],
        }),
    ))
}

async fn update_comment_votes(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    body: Result<Json<VoteIncrement>, JsonRejection>,
) -> ApiResult<Json<CommentsBody<[Comment; 1]>>> {
    let comment_id = parse_id(&comment_id)?;
    let delta = json_body(body)?.delta()?;

    let comment = Comment::increment_votes(state.db(), comment_id, delta)
        .await?
        .ok_or(ApiError::NotFound(Resource::Comment))?;

    Ok(Json(CommentsBody {
        comments: [comment],
    }))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> ApiResult<StatusCode> {
    let comment_id = parse_id(&comment_id)?;

    if !Comment::delete(state.db(), comment_id).await? {
        return Err(ApiError::NotFound(Resource::Comment));
    }

    Ok(StatusCode::NO_CONTENT)
}
