//! Domain models.
//!
//! These types represent validated domain objects separate from request and
//! row decoding concerns.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItemView, CartLineRow};
pub use order::FinalizeReceipt;
pub use product::Product;
pub use user::User;
