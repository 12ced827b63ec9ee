//! Integration tests for Tangerine Toys.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply schema + starter catalog
//! cargo run -p tangerine-cli -- migrate
//! cargo run -p tangerine-cli -- seed
//!
//! # Start the API
//! cargo run -p tangerine-api
//!
//! # Run integration tests (ignored by default)
//! cargo test -p tangerine-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `API_BASE_URL` - API under test (default: `http://localhost:3000`)
//! - `API_DATABASE_URL` / `DATABASE_URL` - database for row-count assertions

#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use reqwest::Client;
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Shared context for one test: HTTP client, API base URL, and a database
/// pool for asserting on row counts behind the API's back.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the API and database named by the environment.
    pub async fn new() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let database_url = std::env::var("API_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("API_DATABASE_URL or DATABASE_URL must be set for integration tests");

        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        Self {
            client: Client::new(),
            base_url,
            pool,
        }
    }

    /// Build a full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Create an account and log in, returning the bearer token.
    pub async fn sign_up_and_login(&self, name: &str, email: &str, password: &str) -> String {
        let resp = self
            .client
            .post(self.url("/sign-up"))
            .json(&json!({"name": name, "email": email, "password": password}))
            .send()
            .await
            .expect("sign-up request failed");
        assert_eq!(resp.status(), 201, "sign-up should succeed");

        let resp = self
            .client
            .post(self.url("/sign-in"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .expect("sign-in request failed");
        assert_eq!(resp.status(), 200, "sign-in should succeed");

        let body: Value = resp.json().await.expect("sign-in body is JSON");
        body["token"]
            .as_str()
            .expect("sign-in returns a token")
            .to_string()
    }

    /// Look up an account id by email, directly in the database.
    pub async fn user_id_by_email(&self, email: &str) -> i32 {
        sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("user exists")
    }

    /// First product id in the catalog (requires a seeded database).
    pub async fn any_product_id(&self) -> i32 {
        sqlx::query_scalar::<_, i32>("SELECT id FROM products ORDER BY id LIMIT 1")
            .fetch_one(&self.pool)
            .await
            .expect("catalog must be seeded (run: tangerine-cli seed)")
    }

    /// Count rows in a user-scoped table.
    pub async fn count_for_user(&self, table: &str, user_id: i32) -> i64 {
        let query = format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .expect("count query succeeds")
    }

    /// Add one unit of a product to the cart behind a token.
    pub async fn add_to_cart(&self, token: &str, product_id: i32) {
        let resp = self
            .client
            .post(self.url("/shopcart"))
            .bearer_auth(token)
            .json(&json!({"product_id": product_id}))
            .send()
            .await
            .expect("add-to-cart request failed");
        assert_eq!(resp.status(), 201, "add-to-cart should succeed");
    }
}

/// Generate a unique email so tests don't collide across runs.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    format!("{prefix}+{nanos}@tangerinetoys.test")
}
