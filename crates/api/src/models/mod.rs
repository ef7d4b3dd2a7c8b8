//! Database models.

pub mod category;
pub mod comment;
pub mod review;
pub mod user;

pub use category::Category;
pub use comment::{Comment, CreateComment, PostedComment};
pub use review::{CreateReview, Review};
pub use user::{User, Username};
