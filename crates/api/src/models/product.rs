//! Product domain types.

use serde::Serialize;
use sqlx::FromRow;

use tangerine_core::{Price, ProductId};

/// A catalog product.
///
/// Read-only from the API's perspective; rows are managed by seed tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Catalog category.
    pub category: String,
}
