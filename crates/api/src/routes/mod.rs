//! HTTP route handlers.

pub mod api;
pub mod category;
pub mod comment;
pub mod health;
pub mod review;
pub mod user;

use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Every route of the service. Unmatched paths, and unmatched methods on
/// known paths, are answered by [`ApiError::RouteNotFound`].
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(api::router())
        .merge(health::router())
        .merge(category::router())
        .merge(review::router())
        .merge(comment::router())
        .merge(user::router())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Unwrap a JSON body, treating any rejection (bad syntax, wrong types,
/// missing content type) as invalid input.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(ApiError::InvalidInput)
        }
    }
}

/// Envelope `{"reviews": ...}`.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewsBody<T> {
    pub reviews: T,
}

/// Envelope `{"comments": ...}`.
#[derive(Debug, Serialize)]
pub(crate) struct CommentsBody<T> {
    pub comments: T,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::state::AppState;

    /// Router over a pool that never connects: any request reaching the
    /// store fails fast.
    pub fn offline_router() -> axum::Router {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy("postgres://offline@127.0.0.1:1/unused")
            .unwrap();
        super::router().with_state(AppState::from_pool(pool, 1))
    }

    pub async fn send(
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = offline_router()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn unmatched_route_is_404() {
        let (status, body) = send("GET", "/api/notExist", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Route not found");
    }

    #[tokio::test]
    async fn unmatched_method_on_unknown_path_is_404() {
        let (status, body) = send("DELETE", "/api/categories/anything/else", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Route not found");
    }

    #[tokio::test]
    async fn unmatched_method_on_known_path_is_404() {
        for (method, uri) in [
            ("PUT", "/api/reviews"),
            ("DELETE", "/api/categories"),
            ("GET", "/api/comments/1"),
            ("PATCH", "/api/users"),
        ] {
            let (status, body) = send(method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(body["msg"], "Route not found", "{method} {uri}");
        }
    }
}
