//! Cart domain types.

use serde::Serialize;
use sqlx::FromRow;

use tangerine_core::{CartLineId, Price, ProductId};

/// One cart line joined with its product, as read from storage.
///
/// One row per unit in the cart. Rows are ordered by `line_id` so the
/// aggregated view's first-seen ordering is deterministic.
#[derive(Debug, Clone, FromRow)]
pub struct CartLineRow {
    /// ID of the cart line itself.
    pub line_id: CartLineId,
    /// Product referenced by this line.
    pub product_id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Catalog category.
    pub category: String,
}

/// Aggregated, counted view of a product's cart lines.
///
/// Built transiently from [`CartLineRow`]s; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    /// Product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Catalog category.
    pub category: String,
    /// Number of cart lines for this product.
    pub count: u32,
}
