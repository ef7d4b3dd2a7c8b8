//! `GET /api`: machine-readable list of the available endpoints.

use std::sync::LazyLock;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::state::AppState;
use crate::validation::SortBy;

/// Create the manifest router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api", get(manifest))
}

async fn manifest() -> Json<Value> {
    Json(MANIFEST.clone())
}

static MANIFEST: LazyLock<Value> = LazyLock::new(|| {
    let sort_keys: Vec<&str> = SortBy::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/categories": {
            "description": "serves an array of all categories",
            "queries": [],
            "exampleResponse": {
                "categories": [{ "slug": "dexterity", "description": "Games involving physical skill" }]
            }
        },
        "POST /api/categories": {
            "description": "adds a category and serves it back",
            "exampleRequest": { "slug": "card games", "description": "Games played with cards" }
        },
        "GET /api/reviews": {
            "description": "serves a page of reviews with their comment counts and the total number of matches",
            "queries": ["category", "sort_by", "order", "p", "limit"],
            "sort_by": sort_keys,
            "exampleResponse": {
                "reviews": [{
                    "review_id": 2,
                    "title": "Jenga",
                    "designer": "Leslie Scott",
                    "owner": "philippaclaire9",
                    "review_img_url": "https://images.pexels.com/photos/4473494/pexels-photo-4473494.jpeg?w=700&h=700",
                    "review_body": "Fiddly fun for all the family",
                    "category": "dexterity",
                    "created_at": "2021-01-18T10:01:41.251Z",
                    "votes": 5,
                    "comment_count": 3
                }],
                "totalCount": 1
            }
        },
        "POST /api/reviews": {
            "description": "adds a review and serves it back",
            "exampleRequest": {
                "title": "Catan",
                "designer": "Klaus Teuber",
                "owner": "mallionaire",
                "review_body": "Trade sheep for wood.",
                "category": "euro game",
                "review_img_url": "optional"
            }
        },
        "GET /api/reviews/:review_id": {
            "description": "serves a single review with its comment count"
        },
        "PATCH /api/reviews/:review_id": {
            "description": "changes the votes of a review by inc_votes",
            "exampleRequest": { "inc_votes": 1 }
        },
        "DELETE /api/reviews/:review_id": {
            "description": "deletes a review and its comments"
        },
        "GET /api/reviews/:review_id/comments": {
            "description": "serves a page of comments on a review, newest first",
            "queries": ["p", "limit"]
        },
        "POST /api/reviews/:review_id/comments": {
            "description": "adds a comment to a review",
            "exampleRequest": { "username": "bainesface", "body": "My new comment here" }
        },
        "PATCH /api/comments/:comment_id": {
            "description": "changes the votes of a comment by inc_votes",
            "exampleRequest": { "inc_votes": -1 }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes a comment"
        },
        "GET /api/users": {
            "description": "serves an array of usernames"
        },
        "GET /api/users/:username": {
            "description": "serves a single user"
        }
    })
});
