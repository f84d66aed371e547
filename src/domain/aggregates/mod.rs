//! Aggregates module
pub mod product;
pub mod cart;

pub use product::Product;
pub use cart::{Cart, CartLine};
