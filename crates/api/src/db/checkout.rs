//! Order finalization unit of work.
//!
//! Converting a cart into orders touches three tables. The whole sequence
//! runs in one transaction so a failure at any step rolls back every step,
//! and the initial `FOR UPDATE` on the account's cart lines serializes
//! concurrent finalizations for the same account: the loser of the race
//! observes an already-emptied cart and converts zero lines.

use sqlx::{PgPool, Postgres, Transaction};

use tangerine_core::{PaymentId, ProductId, UserId};

use super::RepositoryError;
use crate::models::FinalizeReceipt;

/// Repository for the cart-to-order conversion.
pub struct CheckoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutRepository<'a> {
    /// Create a new checkout repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert the user's cart into orders and a payment record.
    ///
    /// In one transaction: lock and read the cart lines, insert one order
    /// row per line, delete exactly the converted lines, insert one
    /// `payment_info` row, commit. An empty cart still finalizes (zero
    /// orders, one payment row).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement or the commit
    /// fails; nothing is persisted in that case.
    pub async fn finalize(
        &self,
        user_id: UserId,
        payment_method: &str,
        tax_id: &str,
    ) -> Result<FinalizeReceipt, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lines = Self::lock_cart_lines(&mut tx, user_id).await?;

        for &(_, product_id) in &lines {
            Self::insert_order_line(&mut tx, user_id, product_id).await?;
        }

        Self::delete_cart_lines(&mut tx, &lines).await?;
        let payment_id = Self::insert_payment_info(&mut tx, user_id, payment_method, tax_id).await?;

        tx.commit().await?;

        Ok(FinalizeReceipt {
            order_lines: lines.len(),
            payment_id,
        })
    }

    /// Read the account's cart lines under row locks.
    ///
    /// A concurrent finalize for the same account blocks here until the
    /// first transaction commits, then sees the deleted rows as gone.
    async fn lock_cart_lines(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> Result<Vec<(i32, ProductId)>, RepositoryError> {
        let lines = sqlx::query_as::<_, (i32, ProductId)>(
            r"
            SELECT id, product_id
            FROM cart_lines
            WHERE user_id = $1
            ORDER BY id
            FOR UPDATE
            ",
        )
        .bind(user_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(lines)
    }

    /// Write one order row for one cart line.
    async fn insert_order_line(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO orders (user_id, product_id)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Delete exactly the lines that were converted to orders.
    ///
    /// A line added to the cart after the lock was taken survives for the
    /// next finalization instead of being silently dropped.
    async fn delete_cart_lines(
        tx: &mut Transaction<'_, Postgres>,
        lines: &[(i32, ProductId)],
    ) -> Result<(), RepositoryError> {
        let ids: Vec<i32> = lines.iter().map(|&(id, _)| id).collect();

        sqlx::query(
            r"
            DELETE FROM cart_lines
            WHERE id = ANY($1)
            ",
        )
        .bind(&ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Record the payment for this finalization event.
    async fn insert_payment_info(
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        payment_method: &str,
        tax_id: &str,
    ) -> Result<PaymentId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO payment_info (user_id, payment_method, tax_id)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(payment_method)
        .bind(tax_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(PaymentId::new(id))
    }
}
