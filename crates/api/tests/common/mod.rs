#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests drive the REAL router and state against the PostgreSQL database in
//! `DATABASE_URL`. A single [`TestApp`] is shared by every test in a binary
//! and lives on [`SHARED_RT`], a runtime that outlives the individual tests.
//!
//! Every test that touches the database calls [`seeded_app`], which takes
//! [`DB_LOCK`] and reloads `data/test.json`, so tests see the same rows and
//! never interleave.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use boardgame_reviews::seed::{self, SeedData};
use boardgame_reviews::{AppState, Config, routes};

/// Shared Tokio runtime that outlives all individual test runtimes.
///
/// PgPool connections need an active I/O driver. Keeping this runtime alive
/// for the whole test binary keeps the shared pool's connections valid.
pub static SHARED_RT: std::sync::LazyLock<tokio::runtime::Runtime> =
    std::sync::LazyLock::new(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to build shared test runtime")
    });

/// Global shared test app, initialized once on the shared runtime.
static SHARED_APP: std::sync::OnceLock<TestApp> = std::sync::OnceLock::new();

/// Serializes tests that read or write seeded rows.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Seed file every database test starts from.
pub fn test_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/test.json")
}

/// Get a reference to the shared [`TestApp`].
pub async fn shared_app() -> &'static TestApp {
    SHARED_APP.get_or_init(|| {
        // Initialize on the shared runtime from a separate OS thread
        // (avoiding nested block_on).
        let handle = SHARED_RT.handle().clone();
        std::thread::spawn(move || handle.block_on(TestApp::new()))
            .join()
            .expect("TestApp init thread panicked")
    })
}

/// Lock the database and reload the test seed.
///
/// Hold the returned guard for the whole test.
pub async fn seeded_app() -> (MutexGuard<'static, ()>, &'static TestApp) {
    let guard = DB_LOCK.lock().await;
    let app = shared_app().await;

    let data = SeedData::from_file(&test_data_path()).expect("Failed to read test seed");
    seed::seed(&app.db, &data)
        .await
        .expect("Failed to seed test database");

    (guard, app)
}

/// Run an async test body on [`SHARED_RT`].
pub fn run_test<F: std::future::Future<Output = ()> + Send>(f: F) {
    SHARED_RT.block_on(f);
}

/// Test application wrapper using the REAL routes and state.
pub struct TestApp {
    router: Router,
    pub db: PgPool,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let config = Config::from_env().expect("Failed to load config");

        let state = AppState::new(&config)
            .await
            .expect("Failed to initialize AppState");
        let db = state.db().clone();

        // Must match main.rs (CORS aside).
        let router = routes::router()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .with_state(state.clone());

        // Pre-warm pool connections on SHARED_RT so none is first opened on
        // a runtime that shuts down before the pool does.
        {
            let mut conns = Vec::new();
            for _ in 0..config.database_max_connections {
                if let Ok(c) = db.acquire().await {
                    conns.push(c);
                }
            }
            drop(conns);
        }

        Self { router, db, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a request and decode the JSON body (`Null` when empty).
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.request(builder.body(body).unwrap()).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }
}

/// Decode a response body as JSON; an empty body decodes to `Null`.
pub async fn response_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
