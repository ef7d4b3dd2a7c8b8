//! Category API routes.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::models::Category;
use crate::routes::json_body;
use crate::state::AppState;
use crate::validation::require;

/// Create the category router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/categories", get(list_categories).post(create_category))
}

#[derive(Debug, Serialize)]
struct CategoriesBody<T> {
    categories: T,
}

#[derive(Debug, Deserialize)]
struct NewCategory {
    slug: Option<String>,
    description: Option<String>,
}

async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<CategoriesBody<Vec<Category>>>> {
    let categories = Category::list(state.db()).await?;
    Ok(Json(CategoriesBody { categories }))
}

async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoriesBody<Category>>)> {
    let input = json_body(body)?;
    let slug = require(input.slug)?;
    let description = require(input.description)?;

    let category = Category::create(state.db(), &slug, &description).await?;
    tracing::info!(slug = %category.slug, "category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoriesBody {
            categories: category,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::send;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn missing_slug_is_invalid_attribute() {
        let (status, body) = send(
            "POST",
            "/api/categories",
            Some(r#"{"description": "Games with cards"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "At least one attribute has an invalid value");
    }

    #[tokio::test]
    async fn null_description_is_invalid_attribute() {
        let (status, body) = send(
            "POST",
            "/api/categories",
            Some(r#"{"slug": "card games", "description": null}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "At least one attribute has an invalid value");
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_input() {
        let (status, body) = send("POST", "/api/categories", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Bad Request: invalid input");
    }
}
