//! Integration tests for account creation and login.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p tangerine-api)
//!
//! Run with: cargo test -p tangerine-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use tangerine_integration_tests::{TestContext, unique_email};

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn sign_up_creates_exactly_one_account() {
    let ctx = TestContext::new().await;
    let email = unique_email("signup");

    let before = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert_eq!(before, 0);

    let resp = ctx
        .client
        .post(ctx.url("/sign-up"))
        .json(&json!({"name": "Sunny Tester", "email": email, "password": "123456"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let after = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert_eq!(after, 1);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn duplicate_email_conflicts_and_leaves_one_account() {
    let ctx = TestContext::new().await;
    let email = unique_email("duplicate");
    let body = json!({"name": "Sunny Tester", "email": email, "password": "123456"});

    let first = ctx
        .client
        .post(ctx.url("/sign-up"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 201);

    let second = ctx
        .client
        .post(ctx.url("/sign-up"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 409);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn sign_in_returns_name_and_usable_token() {
    let ctx = TestContext::new().await;
    let email = unique_email("login");

    let resp = ctx
        .client
        .post(ctx.url("/sign-up"))
        .json(&json!({"name": "Sunny Tester", "email": email, "password": "123456"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = ctx
        .client
        .post(ctx.url("/sign-in"))
        .json(&json!({"email": email, "password": "123456"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Sunny Tester");
    let token = body["token"].as_str().unwrap();

    // The token resolves to the signer's account: an authenticated route accepts it
    let resp = ctx
        .client
        .get(ctx.url("/shopcart"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn sign_in_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new().await;
    let email = unique_email("wrongpw");

    ctx.sign_up_and_login("Sunny Tester", &email, "123456").await;

    let resp = ctx
        .client
        .post(ctx.url("/sign-in"))
        .json(&json!({"email": email, "password": "654321"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn sign_in_with_unknown_email_is_unauthorized() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/sign-in"))
        .json(&json!({"email": unique_email("ghost"), "password": "123456"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running api server and PostgreSQL"]
async fn token_for_deleted_account_is_unauthorized() {
    let ctx = TestContext::new().await;
    let email = unique_email("stale");

    let token = ctx.sign_up_and_login("Sunny Tester", &email, "123456").await;
    let user_id = ctx.user_id_by_email(&email).await;

    // Delete the account out from under the still-valid token
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&ctx.pool)
        .await
        .unwrap();

    let resp = ctx
        .client
        .get(ctx.url("/shopcart"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
