//! Business services.

pub mod auth;
pub mod cart;
pub mod token;

pub use auth::{AuthError, AuthService};
