//! Cart repository for database operations.

use sqlx::PgPool;

use tangerine_core::{CartLineId, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLineRow;

/// Repository for cart line operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add one unit of a product to the user's cart.
    ///
    /// Each call inserts a fresh row; quantity is represented by row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<CartLineId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO cart_lines (user_id, product_id)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(CartLineId::new(id))
    }

    /// Fetch the user's cart lines joined with their products.
    ///
    /// Ordered by cart line id (insertion order) so the aggregated view's
    /// first-seen product ordering is deterministic. Lines referencing a
    /// product that no longer exists are dropped by the inner join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartLineRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT
                cl.id AS line_id,
                p.id AS product_id,
                p.name,
                p.price,
                p.image,
                p.category
            FROM cart_lines cl
            JOIN products p ON p.id = cl.product_id
            WHERE cl.user_id = $1
            ORDER BY cl.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
