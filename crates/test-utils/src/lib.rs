//! Board-game review test utilities.
//!
//! Helpers for integration testing: request payload builders and assertion
//! utilities for JSON responses.

use serde_json::{Value as JsonValue, json};

/// Create a review payload with defaults drawn from the test seed.
pub fn test_review(title: &str) -> TestReview {
    TestReview {
        title: Some(title.to_string()),
        designer: Some("Klaus Teuber".to_string()),
        owner: Some("mallionaire".to_string()),
        review_img_url: None,
        review_body: Some("Trade sheep for wood.".to_string()),
        category: Some("euro game".to_string()),
    }
}

/// A review payload builder for `POST /api/reviews`.
///
/// `None` fields are left out of the JSON entirely.
#[derive(Debug, Clone)]
pub struct TestReview {
    pub title: Option<String>,
    pub designer: Option<String>,
    pub owner: Option<String>,
    pub review_img_url: Option<String>,
    pub review_body: Option<String>,
    pub category: Option<String>,
}

impl TestReview {
    /// Set the owner.
    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: &str) -> Self {
        self.review_img_url = Some(url.to_string());
        self
    }

    /// Drop the review body.
    pub fn without_body(mut self) -> Self {
        self.review_body = None;
        self
    }

    /// Render as a request body.
    pub fn to_json(&self) -> JsonValue {
        let mut body = serde_json::Map::new();
        let fields = [
            ("title", &self.title),
            ("designer", &self.designer),
            ("owner", &self.owner),
            ("review_img_url", &self.review_img_url),
            ("review_body", &self.review_body),
            ("category", &self.category),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body.insert(key.to_string(), JsonValue::String(value.clone()));
            }
        }
        JsonValue::Object(body)
    }
}

/// `POST /api/reviews/:id/comments` body. `None` is sent as JSON null.
pub fn test_comment(username: Option<&str>, body: Option<&str>) -> JsonValue {
    json!({ "username": username, "body": body })
}

/// `POST /api/categories` body.
pub fn test_category(slug: &str, description: &str) -> JsonValue {
    json!({ "slug": slug, "description": description })
}

/// `PATCH` vote body.
pub fn inc_votes(delta: i32) -> JsonValue {
    json!({ "inc_votes": delta })
}

/// Assertion helpers for JSON responses.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that every object in `rows` carries all of `keys`.
    pub fn rows_have_keys(rows: &[Value], keys: &[&str]) {
        for row in rows {
            for key in keys {
                has_key(row, key);
            }
        }
    }

    /// Assert that `rows` are ordered by `key`.
    ///
    /// Strings compare bytewise, numbers numerically. Not suitable for
    /// timestamps or text the database orders by locale collation.
    pub fn sorted_by(rows: &[Value], key: &str, descending: bool) {
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0][key], &pair[1][key]);
            let ordering = match (a, b) {
                (Value::Number(x), Value::Number(y)) => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(std::cmp::Ordering::Equal),
                (Value::String(x), Value::String(y)) => x.cmp(y),
                _ => panic!("cannot compare {a} and {b} for key '{key}'"),
            };
            let in_order = if descending {
                ordering.is_ge()
            } else {
                ordering.is_le()
            };
            assert!(
                in_order,
                "rows not sorted by '{key}' (descending: {descending}): {a} then {b}"
            );
        }
    }
}
