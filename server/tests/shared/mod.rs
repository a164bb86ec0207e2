#![allow(dead_code)]

use axum::body::{Body, to_bytes};
use data_access::DataAccess;
use http::{Request, Response};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;


pub async fn data_access() -> DataAccess {
    // every connection to `sqlite::memory:` is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("unable to connect to test db");

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("unable to run migrations");

    DataAccess::new(pool)
}

pub async fn insert_users(data_access: &DataAccess, usernames: &[&str]) {
    for username in usernames {
        sqlx::query("INSERT INTO users (username) VALUES (?)")
            .bind(*username)
            .execute(data_access.pool())
            .await
            .expect("unable to insert user");
    }
}

pub struct TestClient {
    data_access: DataAccess,
}

impl TestClient {
    pub async fn new() -> Self {
        Self {
            data_access: data_access().await,
        }
    }

    pub async fn with_users(usernames: &[&str]) -> Self {
        let client = Self::new().await;
        insert_users(&client.data_access, usernames).await;
        client
    }

    pub fn data_access(&self) -> &DataAccess {
        &self.data_access
    }

    pub async fn send(&self, request: Request<Body>) -> Asserter {
        let response = server::server(self.data_access.clone())
            .oneshot(request)
            .await
            .unwrap(/* Infallible */);
        Asserter::from(response)
    }
}

pub struct Asserter {
    response: Response<Body>,
}

impl Asserter {
    pub fn status(self, expected: u16) -> Self {
        assert_eq!(
            self.response.status().as_u16(),
            expected,
            "expected status {}, got {}",
            expected,
            self.response.status()
        );
        self
    }

    pub fn has_request_id(self) -> Self {
        assert!(
            self.response.headers().contains_key("x-request-id"),
            "expected `x-request-id` response header"
        );
        self
    }

    pub async fn json_body(self, f: impl FnOnce(serde_json::Value)) {
        f(self.into_json_body().await)
    }

    pub async fn into_json_body(self) -> serde_json::Value {
        let body_bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");

        serde_json::from_slice(&body_bytes).expect("unable to deserialize response body")
    }

    pub async fn empty_body(self) {
        let body_bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");

        assert!(body_bytes.is_empty(), "expected empty body, got {:?}", body_bytes);
    }
}

impl From<Response<Body>> for Asserter {
    fn from(response: Response<Body>) -> Self {
        Self { response }
    }
}

#[cfg(feature = "test-tracing")]
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

#[cfg(feature = "test-tracing")]
pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
