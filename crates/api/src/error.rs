//! Application error types.
//!
//! Every failure a handler can hit ends up as an [`ApiError`], which renders as
//! `{"msg": "..."}` with the status picked by [`ApiError::status`]. Store
//! failures arrive as `anyhow::Error` from the models and are classified by the
//! PostgreSQL SQLSTATE found in their chain.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Entity kinds that can be missing on a primary-key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Review,
    Comment,
    User,
}

impl Resource {
    fn not_found_message(self) -> &'static str {
        match self {
            Resource::Review => "Bad Request: Review ID does not exist",
            Resource::Comment => "Bad Request: Invalid Comment ID",
            Resource::User => "Bad Request: Username does not exist",
        }
    }
}

/// Application errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path, query or body value (e.g. a non-numeric id).
    #[error("Bad Request: invalid input")]
    InvalidInput,

    /// `sort_by` or `order` outside the whitelist.
    #[error("Bad Request: Invalid sorting options")]
    InvalidSortKind,

    /// Missing required field or a foreign key that does not resolve.
    #[error("At least one attribute has an invalid value")]
    InvalidAttribute,

    /// Unique key already taken.
    #[error("Bad Request: Resource already exists")]
    DuplicateKey,

    /// No row matches a primary-key lookup.
    #[error("{}", .0.not_found_message())]
    NotFound(Resource),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Internal Server Error")]
    Internal(anyhow::Error),
}

impl ApiError {
    /// HTTP status carried by this error.
    ///
    /// `NotFound` is a 400: 404 is reserved for unmatched routes.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput
            | ApiError::InvalidSortKind
            | ApiError::InvalidAttribute
            | ApiError::DuplicateKey
            | ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map a PostgreSQL SQLSTATE to a client error, if it is one.
fn classify_sqlstate(code: &str) -> Option<ApiError> {
    match code {
        // not_null_violation, foreign_key_violation
        "23502" | "23503" => Some(ApiError::InvalidAttribute),
        // unique_violation
        "23505" => Some(ApiError::DuplicateKey),
        // invalid_text_representation, numeric_value_out_of_range
        "22P02" | "22003" => Some(ApiError::InvalidInput),
        _ => None,
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let code = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<sqlx::Error>())
            .find_map(|e| match e {
                sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
                _ => None,
            });

        code.as_deref()
            .and_then(classify_sqlstate)
            .unwrap_or_else(|| ApiError::Internal(err))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        anyhow::Error::from(err).into()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "internal server error");
            }
            other => {
                tracing::debug!(status = status.as_u16(), msg = %other, "request rejected");
            }
        }

        let body = ErrorBody {
            msg: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
