//! User API routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::{ApiError, ApiResult, Resource};
use crate::models::{User, Username};
use crate::state::AppState;

/// Create the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{username}", get(get_user))
}

#[derive(Debug, Serialize)]
struct UsersBody<T> {
    users: T,
}

async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UsersBody<Vec<Username>>>> {
    let users = User::list_usernames(state.db()).await?;
    Ok(Json(UsersBody { users }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UsersBody<[User; 1]>>> {
    let user = User::find_by_username(state.db(), &username)
        .await?
        .ok_or(ApiError::NotFound(Resource::User))?;

    Ok(Json(UsersBody { users: [user] }))
}
