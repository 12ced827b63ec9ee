//! Cart aggregation.
//!
//! The cart is stored one-row-per-unit; the view callers see is one item
//! per product with a count.

use crate::models::{CartItemView, CartLineRow};

/// Fold raw cart lines into counted per-product items.
///
/// Rows are walked in storage order (cart line insertion order): the first
/// occurrence of a product creates its item, every later occurrence
/// increments the count. Output ordering is therefore first-seen product
/// order. An empty cart folds to an empty vec.
#[must_use]
pub fn aggregate_lines(rows: Vec<CartLineRow>) -> Vec<CartItemView> {
    let mut items: Vec<CartItemView> = Vec::new();

    for row in rows {
        if let Some(item) = items.iter_mut().find(|item| item.id == row.product_id) {
            item.count += 1;
        } else {
            items.push(CartItemView {
                id: row.product_id,
                name: row.name,
                price: row.price,
                image: row.image,
                category: row.category,
                count: 1,
            });
        }
    }

    items
}
