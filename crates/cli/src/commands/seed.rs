//! Catalog seeding command.
//!
//! Inserts a starter catalog so a fresh database has products to sell.
//! Idempotent: does nothing if the catalog already has rows.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{CommandError, database_url};

/// Starter catalog: (name, price in cents, image, category).
const STARTER_CATALOG: &[(&str, i64, &str, &str)] = &[
    (
        "Wooden Block Set",
        2499,
        "https://cdn.tangerinetoys.com/img/wooden-blocks.png",
        "building",
    ),
    (
        "Plush Dinosaur",
        1899,
        "https://cdn.tangerinetoys.com/img/plush-dino.png",
        "plush",
    ),
    (
        "Wind-Up Robot",
        1250,
        "https://cdn.tangerinetoys.com/img/wind-up-robot.png",
        "mechanical",
    ),
    (
        "Box Kite",
        1575,
        "https://cdn.tangerinetoys.com/img/box-kite.png",
        "outdoor",
    ),
    (
        "Marble Run",
        3200,
        "https://cdn.tangerinetoys.com/img/marble-run.png",
        "building",
    ),
];

/// Seed the catalog.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;

    if existing > 0 {
        tracing::info!("Catalog already has {existing} products, nothing to do");
        return Ok(());
    }

    for &(name, cents, image, category) in STARTER_CATALOG {
        sqlx::query(
            r"
            INSERT INTO products (name, price, image, category)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(Decimal::new(cents, 2))
        .bind(image)
        .bind(category)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeded {} products", STARTER_CATALOG.len());
    Ok(())
}
