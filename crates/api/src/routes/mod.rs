//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Accounts
//! POST /sign-up                - Create an account
//! POST /sign-in                - Login, returns {name, token}
//!
//! # Catalog
//! GET  /products               - Product listing
//!
//! # Cart (requires bearer token)
//! GET  /shopcart               - Aggregated cart view
//! POST /shopcart               - Add one unit of a product
//!
//! # Checkout (requires bearer token)
//! POST /confirm-order          - Convert cart into orders + payment record
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::body::Bytes;
use axum::{
    Router,
    routing::{get, post},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::state::AppState;

/// Create the application router (all routes, no layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in))
        .route("/products", get(products::index))
        .route("/shopcart", get(cart::show).post(cart::add))
        .route("/confirm-order", post(checkout::confirm))
}

/// Parse a JSON request body.
///
/// Bodies are taken as raw bytes and parsed by hand so that a missing or
/// malformed body is a plain 400 validation failure, not a content-type
/// rejection.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))
}

/// Unwrap a required, non-empty string field.
pub(crate) fn required(field: Option<String>, name: &'static str) -> Result<String, AppError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Validation(format!("{name} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Probe {
        value: Option<i32>,
    }

    #[test]
    fn test_parse_json_rejects_empty_body() {
        let result = parse_json::<Probe>(&Bytes::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_json_rejects_non_json() {
        let result = parse_json::<Probe>(&Bytes::from_static(b"value=3"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_json_accepts_missing_fields() {
        let probe = parse_json::<Probe>(&Bytes::from_static(b"{}")).expect("parses");
        assert!(probe.value.is_none());
    }

    #[test]
    fn test_required_rejects_missing_and_empty() {
        assert!(required(None, "tax_id").is_err());
        assert!(required(Some(String::new()), "tax_id").is_err());
        assert_eq!(
            required(Some("123".to_string()), "tax_id").expect("present"),
            "123"
        );
    }
}
