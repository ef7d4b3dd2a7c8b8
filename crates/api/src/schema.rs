//! Table and column identifiers for SeaQuery statements.
//!
//! `Table` renders as the table name; every other variant renders as its
//! snake_case column name.

use sea_query::Iden;

#[derive(Debug, Clone, Copy, Iden)]
pub enum Categories {
    Table,
    Slug,
    Description,
}

#[derive(Debug, Clone, Copy, Iden)]
pub enum Users {
    Table,
    Username,
    Name,
    AvatarUrl,
}

/// `game_title` and `game_designer` are exposed as `title` and `designer`.
#[derive(Debug, Clone, Copy, Iden)]
pub enum Reviews {
    Table,
    ReviewId,
    GameTitle,
    GameDesigner,
    Owner,
    ReviewImgUrl,
    ReviewBody,
    Category,
    CreatedAt,
    Votes,
}

#[derive(Debug, Clone, Copy, Iden)]
pub enum Comments {
    Table,
    CommentId,
    Author,
    ReviewId,
    Votes,
    CreatedAt,
    Body,
}

/// Image used when a review is created without one.
pub const DEFAULT_REVIEW_IMG_URL: &str =
    "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg";

/// DDL applied by [`crate::seed::seed`], in dependency order.
///
/// Comments are removed together with their review.
pub const CREATE_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS comments",
    "DROP TABLE IF EXISTS reviews",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS categories",
    r#"
    CREATE TABLE categories (
        slug VARCHAR(255) PRIMARY KEY,
        description VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE users (
        username VARCHAR(255) PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        avatar_url VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE reviews (
        review_id SERIAL PRIMARY KEY,
        game_title VARCHAR(255) NOT NULL,
        game_designer VARCHAR(255) NOT NULL,
        owner VARCHAR(255) NOT NULL REFERENCES users(username),
        review_img_url VARCHAR(255) NOT NULL
            DEFAULT 'https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg',
        review_body TEXT NOT NULL,
        category VARCHAR(255) NOT NULL REFERENCES categories(slug),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        votes INT NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE comments (
        comment_id SERIAL PRIMARY KEY,
        author VARCHAR(255) NOT NULL REFERENCES users(username),
        review_id INT NOT NULL REFERENCES reviews(review_id) ON DELETE CASCADE,
        votes INT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        body TEXT NOT NULL
    )
    "#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idens_render_snake_case() {
        assert_eq!(Reviews::Table.to_string(), "reviews");
        assert_eq!(Reviews::GameTitle.to_string(), "game_title");
        assert_eq!(Reviews::ReviewImgUrl.to_string(), "review_img_url");
        assert_eq!(Comments::CommentId.to_string(), "comment_id");
        assert_eq!(Users::AvatarUrl.to_string(), "avatar_url");
    }

    #[test]
    fn ddl_default_image_matches_constant() {
        assert!(
            CREATE_TABLES
                .iter()
                .any(|stmt| stmt.contains(DEFAULT_REVIEW_IMG_URL))
        );
    }
}
