//! Board-game review catalogue.
//!
//! This library exposes the service internals for integration testing.
//! The main entry point for running the server is the `boardgame-reviews`
//! binary.

pub mod catalogue;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod state;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
