//! Cart handlers.

use axum::body::Bytes;
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use tangerine_core::ProductId;

use crate::db::cart::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CartItemView;
use crate::services::cart::aggregate_lines;
use crate::state::AppState;

use super::parse_json;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddCartLineRequest {
    pub product_id: Option<i32>,
}

impl AddCartLineRequest {
    /// Validate the referenced product id.
    fn validate(self) -> Result<ProductId> {
        match self.product_id {
            Some(id) if id >= 1 => Ok(ProductId::new(id)),
            _ => Err(AppError::Validation(
                "product_id must be a positive integer".to_string(),
            )),
        }
    }
}

/// `POST /shopcart` - add one unit of a product to the caller's cart.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Bytes,
) -> Result<StatusCode> {
    let request: AddCartLineRequest = parse_json(&body)?;
    let product_id = request.validate()?;

    CartRepository::new(state.pool())
        .add_line(user.id, product_id)
        .await?;

    Ok(StatusCode::CREATED)
}

/// `GET /shopcart` - the caller's cart, aggregated per product.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<CartItemView>>> {
    let rows = CartRepository::new(state.pool())
        .list_with_products(user.id)
        .await?;

    Ok(Json(aggregate_lines(rows)))
}
